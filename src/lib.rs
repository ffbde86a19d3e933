//! 课程管理后端服务
//!
//! 基于 Actix Web 与 SeaORM，提供课程、学生、导师、任务管理以及学生互评（cross-check）流程。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层与仪表盘静态资源
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层（含互评配对算法）
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
