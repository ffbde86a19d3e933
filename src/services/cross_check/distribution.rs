use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use rand::{Rng, seq::SliceRandom};
use std::collections::{HashMap, HashSet};

use super::{CrossCheckService, load_cross_check_task};
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    cross_check::{
        entities::{CrossCheckPair, NewTaskSolutionChecker},
        requests::CourseTaskPath,
        responses::DistributionResponse,
    },
};
use crate::services::{require_admin, session_user};
use crate::storage::Storage;
use crate::utils::error_response;

/// 为学生池生成互评配对
///
/// 打乱顺序后按环形偏移分配：第 i 个学生评审其后 1..=k 位的作业。
/// 每个学生恰好评审 min(k, n-1) 份作业、被 min(k, n-1) 人评审，且不会评审自己。
pub fn create_cross_check_pairs(student_ids: &[i64], pairs_count: usize) -> Vec<CrossCheckPair> {
    create_cross_check_pairs_with_rng(student_ids, pairs_count, &mut rand::rng())
}

pub fn create_cross_check_pairs_with_rng<R: Rng + ?Sized>(
    student_ids: &[i64],
    pairs_count: usize,
    rng: &mut R,
) -> Vec<CrossCheckPair> {
    let mut seen = HashSet::new();
    let mut pool: Vec<i64> = student_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();

    let n = pool.len();
    if n < 2 || pairs_count == 0 {
        return Vec::new();
    }
    pool.shuffle(rng);

    let reviewers = pairs_count.min(n - 1);
    let mut pairs = Vec::with_capacity(n * reviewers);
    for offset in 1..=reviewers {
        for (i, checker_id) in pool.iter().enumerate() {
            pairs.push(CrossCheckPair {
                checker_id: *checker_id,
                student_id: pool[(i + offset) % n],
            });
        }
    }
    pairs
}

/// 对尚未分配的作业执行配对并写入分配记录
pub async fn distribute(
    storage: &dyn Storage,
    course_id: i64,
    course_task_id: i64,
    default_pairs_count: usize,
) -> Result<DistributionResponse> {
    let course_task = load_cross_check_task(storage, course_id, course_task_id).await?;
    let solutions = storage
        .get_task_solutions_without_checker(course_task.id)
        .await?;

    let solution_by_student: HashMap<i64, i64> = solutions
        .iter()
        .map(|solution| (solution.student_id, solution.id))
        .collect();
    let student_ids: Vec<i64> = solutions.iter().map(|s| s.student_id).collect();

    let pairs = create_cross_check_pairs(
        &student_ids,
        course_task.pairs_count_or(default_pairs_count),
    );
    let checkers: Vec<NewTaskSolutionChecker> = pairs
        .into_iter()
        .filter_map(|pair| {
            solution_by_student
                .get(&pair.student_id)
                .map(|solution_id| NewTaskSolutionChecker {
                    course_task_id: course_task.id,
                    student_id: pair.student_id,
                    checker_id: pair.checker_id,
                    task_solution_id: *solution_id,
                })
        })
        .collect();

    if checkers.is_empty() {
        tracing::info!(
            "Cross-check distribution for course task {} skipped: {} unassigned solutions",
            course_task.id,
            solutions.len()
        );
        return Ok(DistributionResponse {
            cross_check_pairs: Vec::new(),
        });
    }

    let cross_check_pairs = storage.create_task_solution_checkers(checkers).await?;
    tracing::info!(
        "Distributed {} cross-check pairs for course task {}",
        cross_check_pairs.len(),
        course_task.id
    );
    Ok(DistributionResponse { cross_check_pairs })
}

pub async fn handle_create_distribution(
    service: &CrossCheckService,
    path: CourseTaskPath,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let default_pairs_count = service.get_config().default_pairs_count;

    let result = async {
        require_admin(&session_user(request)?)?;
        distribute(
            storage.as_ref(),
            path.course_id,
            path.course_task_id,
            default_pairs_count,
        )
        .await
    }
    .await;

    match result {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Cross-check distribution created",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn counts(pairs: &[CrossCheckPair]) -> (HashMap<i64, usize>, HashMap<i64, usize>) {
        let mut as_checker = HashMap::new();
        let mut as_student = HashMap::new();
        for pair in pairs {
            *as_checker.entry(pair.checker_id).or_insert(0) += 1;
            *as_student.entry(pair.student_id).or_insert(0) += 1;
        }
        (as_checker, as_student)
    }

    #[test]
    fn test_no_self_review_and_no_duplicates() {
        let ids: Vec<i64> = (1..=10).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let pairs = create_cross_check_pairs_with_rng(&ids, 4, &mut rng);

        assert_eq!(pairs.len(), 40);
        assert!(pairs.iter().all(|p| p.checker_id != p.student_id));
        let unique: HashSet<_> = pairs.iter().collect();
        assert_eq!(unique.len(), pairs.len());
    }

    #[test]
    fn test_every_student_gets_same_number_of_reviewers() {
        let ids: Vec<i64> = (100..120).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let pairs = create_cross_check_pairs_with_rng(&ids, 3, &mut rng);

        let (as_checker, as_student) = counts(&pairs);
        assert_eq!(as_checker.len(), 20);
        assert_eq!(as_student.len(), 20);
        assert!(as_checker.values().all(|c| *c == 3));
        assert!(as_student.values().all(|c| *c == 3));
    }

    #[test]
    fn test_pairing_invariants_across_pool_sizes() {
        let mut rng = StdRng::seed_from_u64(2025);
        for n in 2..=12_i64 {
            let ids: Vec<i64> = (1..=n).collect();
            for k in 0..=6_usize {
                let pairs = create_cross_check_pairs_with_rng(&ids, k, &mut rng);
                let expected = k.min(n as usize - 1);

                assert_eq!(pairs.len(), n as usize * expected, "n={n} k={k}");
                assert!(pairs.iter().all(|p| p.checker_id != p.student_id), "n={n} k={k}");
                let unique: HashSet<_> = pairs.iter().collect();
                assert_eq!(unique.len(), pairs.len(), "n={n} k={k}");

                let (as_checker, as_student) = counts(&pairs);
                assert!(as_checker.values().all(|c| *c == expected), "n={n} k={k}");
                assert!(as_student.values().all(|c| *c == expected), "n={n} k={k}");
                if expected > 0 {
                    assert_eq!(as_student.len(), n as usize, "n={n} k={k}");
                }
            }
        }
    }

    #[test]
    fn test_pool_smaller_than_pairs_count() {
        let pairs = create_cross_check_pairs(&[1, 2, 3, 4], 4);

        // 4 人池最多 3 个评审
        assert_eq!(pairs.len(), 12);
        let (as_checker, as_student) = counts(&pairs);
        assert!(as_checker.values().all(|c| *c == 3));
        assert!(as_student.values().all(|c| *c == 3));
    }

    #[test]
    fn test_degenerate_pools() {
        assert!(create_cross_check_pairs(&[], 4).is_empty());
        assert!(create_cross_check_pairs(&[1], 4).is_empty());
        assert!(create_cross_check_pairs(&[1, 2, 3], 0).is_empty());
        // 重复 ID 只算一次
        assert!(create_cross_check_pairs(&[5, 5, 5], 2).is_empty());
    }

    #[test]
    fn test_two_students_review_each_other() {
        let mut pairs = create_cross_check_pairs(&[1, 2], 4);
        pairs.sort_by_key(|p| p.checker_id);
        assert_eq!(
            pairs,
            vec![
                CrossCheckPair {
                    checker_id: 1,
                    student_id: 2
                },
                CrossCheckPair {
                    checker_id: 2,
                    student_id: 1
                },
            ]
        );
    }
}
