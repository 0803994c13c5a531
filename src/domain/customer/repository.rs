//! Customer repository interface

use async_trait::async_trait;

use super::model::{Customer, NewCustomer};
use crate::domain::DomainResult;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Create a customer account, assigning its id
    async fn create(&self, customer: NewCustomer) -> DomainResult<Customer>;

    /// Find customer by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Customer>>;

    /// Find customer by email (login identifier)
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Customer>>;
}
