//! Customer domain entity

use chrono::{DateTime, Utc};

/// Registered customer account
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Login identifier, unique
    pub email: String,
    pub telephone: Option<String>,
    /// bcrypt hash
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Authenticated customer identity.
///
/// Passed explicitly into every operation that is scoped to a customer;
/// there is no ambient "current customer" lookup. `None` always means
/// anonymous, which yields empty listings and unscoped hash lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerIdentity {
    pub id: i32,
    pub email: String,
    pub name: String,
}

impl From<&Customer> for CustomerIdentity {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            email: customer.email.clone(),
            name: customer.full_name(),
        }
    }
}

/// Data required to create a customer account
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub telephone: Option<String>,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_from_customer() {
        let customer = Customer {
            id: 7,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            telephone: None,
            password_hash: "$2b$x".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let identity = CustomerIdentity::from(&customer);
        assert_eq!(identity.id, 7);
        assert_eq!(identity.name, "Ada Lovelace");
        assert_eq!(identity.email, "ada@example.com");
    }
}
