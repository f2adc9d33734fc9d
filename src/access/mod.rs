//! 访问控制
//!
//! - `principal`: 请求主体（学生 / 教师 / 未分配）
//! - `registry`: 资源归属登记表
//! - `policy`: 端点授权策略表
//! - `evaluator`: 权限判定与范围过滤
//! - `nested`: 嵌套资源解析

pub mod evaluator;
pub mod nested;
pub mod policy;
pub mod principal;
pub mod registry;

pub use evaluator::{Decision, DenyReason, ScopeFilter, authorize, scope_filter};
pub use nested::NestedError;
pub use policy::Action;
pub use principal::Principal;
pub use registry::{FieldSet, OwnedResource, ResourceKind, SubmissionView};
