use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, load_course};
use crate::cache::{ObjectCache, get_json, insert_json};
use crate::errors::{CourseAppError, Result};
use crate::models::{ApiResponse, ErrorCode, courses::entities::CourseStats};
use crate::storage::Storage;
use crate::utils::{error_response, error_response_with};

// 统计结果缓存时间（秒）
const STATS_CACHE_TTL: u64 = 60;

fn stats_cache_key(course_id: i64) -> String {
    format!("course_stats:{course_id}")
}

/// 学生或导师变化后清除统计缓存
pub(crate) async fn invalidate_stats(cache: Option<&dyn ObjectCache>, course_id: i64) {
    if let Some(cache) = cache {
        cache.remove(&stats_cache_key(course_id)).await;
    }
}

pub async fn get_course_stats(
    storage: &dyn Storage,
    cache: Option<&dyn ObjectCache>,
    course_id: i64,
) -> Result<CourseStats> {
    let key = stats_cache_key(course_id);
    if let Some(cache) = cache
        && let Some(stats) = get_json::<CourseStats>(cache, &key).await
    {
        return Ok(stats);
    }

    load_course(storage, course_id).await?;
    let stats = storage.get_course_stats(course_id).await?;

    if let Some(cache) = cache {
        insert_json(cache, key, &stats, STATS_CACHE_TTL).await;
    }
    Ok(stats)
}

pub async fn handle_get_stats(
    service: &CourseService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    match get_course_stats(storage.as_ref(), cache.as_deref(), course_id).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "Success"))),
        Err(e @ CourseAppError::NotFound(_)) => {
            Ok(error_response_with(&e, ErrorCode::CourseNotFound))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
