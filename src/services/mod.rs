//! Project and task use-cases.
//!
//! Services take the caller's identity as an explicit argument, authorize
//! through the [`OwnershipGuard`](crate::guard::OwnershipGuard) and only then
//! read or write the store. Input is expected to be validated already.

pub mod projects;
pub mod tasks;

pub use projects::ProjectService;
pub use tasks::TaskService;
