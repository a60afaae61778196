//! Spend ranking and category aggregation.

use indexmap::IndexMap;
use serde::Serialize;

use stripe_client::{Customer, Payment};

use crate::classifier::{Classification, CompanyClassifier, SkipReason};
use crate::traits::{ChatModel, PageFetcher};

/// A customer with their lifetime spend in the smallest currency unit.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerSpend {
    pub customer: Customer,
    pub total_spent: i64,
}

/// A top customer with a resolved industry category.
#[derive(Debug, Clone, Serialize)]
pub struct CategorizedCustomer {
    pub customer: Customer,
    pub total_spent: i64,
    pub category: String,
}

/// Aggregate of all top customers sharing a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBucket {
    /// Number of customers in the category
    pub count: usize,

    /// Combined spend in the major currency unit (dollars, not cents)
    pub total_spent: f64,

    /// Member emails in ranked order; a customer without an email
    /// contributes a null entry
    pub customers: Vec<Option<String>>,
}

/// Compute each customer's total spend and rank descending.
///
/// The join is a linear scan of all payments per customer. The sort is
/// stable, so equal totals keep their original relative order.
pub fn rank_by_spend(customers: &[Customer], payments: &[Payment]) -> Vec<CustomerSpend> {
    let mut ranked: Vec<CustomerSpend> = customers
        .iter()
        .map(|customer| {
            let total_spent = payments
                .iter()
                .filter(|p| p.customer.as_deref() == Some(customer.id.as_str()))
                .map(|p| p.amount)
                .sum();
            CustomerSpend {
                customer: customer.clone(),
                total_spent,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.total_spent.cmp(&a.total_spent));
    ranked
}

/// Rank customers by spend, take the top `top_n`, and classify each one
/// in ranked order, strictly one at a time.
///
/// Customers whose classification is skipped (consumer domain, missing
/// email, failed fetch or model call) are dropped from the result.
pub async fn analyze_top<F: PageFetcher, M: ChatModel>(
    classifier: &CompanyClassifier<F, M>,
    customers: &[Customer],
    payments: &[Payment],
    top_n: usize,
) -> Vec<CategorizedCustomer> {
    let ranked = rank_by_spend(customers, payments);

    let mut categorized = Vec::new();
    for CustomerSpend {
        customer,
        total_spent,
    } in ranked.into_iter().take(top_n)
    {
        let classification = match customer.email.as_deref() {
            Some(email) => classifier.classify(email).await,
            None => Classification::Skipped(SkipReason::NoDomain),
        };

        match classification {
            Classification::Categorized(category) => categorized.push(CategorizedCustomer {
                customer,
                total_spent,
                category,
            }),
            Classification::Skipped(_) => continue,
        }
    }

    categorized
}

/// Group categorized customers into per-category buckets, preserving
/// first-seen category order.
pub fn bucket_by_category(
    categorized: &[CategorizedCustomer],
) -> IndexMap<String, CategoryBucket> {
    let mut buckets: IndexMap<String, CategoryBucket> = IndexMap::new();

    for entry in categorized {
        let spent_major = entry.total_spent as f64 / 100.0;
        match buckets.get_mut(&entry.category) {
            Some(bucket) => {
                bucket.count += 1;
                bucket.total_spent += spent_major;
                bucket.customers.push(entry.customer.email.clone());
            }
            None => {
                buckets.insert(
                    entry.category.clone(),
                    CategoryBucket {
                        count: 1,
                        total_spent: spent_major,
                        customers: vec![entry.customer.email.clone()],
                    },
                );
            }
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{customer, payment};

    #[test]
    fn test_total_spent_sums_matching_payments() {
        let customers = vec![customer("c1", Some("a@acme.com")), customer("c2", None)];
        let payments = vec![
            payment("p1", Some("c1"), 500),
            payment("p2", Some("c1"), 300),
            payment("p3", Some("c2"), 100),
            // References no known customer
            payment("p4", Some("c9"), 900),
            // No customer reference at all
            payment("p5", None, 400),
        ];

        let ranked = rank_by_spend(&customers, &payments);

        let c1 = ranked.iter().find(|s| s.customer.id == "c1").unwrap();
        let c2 = ranked.iter().find(|s| s.customer.id == "c2").unwrap();
        assert_eq!(c1.total_spent, 800);
        assert_eq!(c2.total_spent, 100);
    }

    #[test]
    fn test_customer_with_no_payments_spends_zero() {
        let customers = vec![customer("c1", None)];
        let ranked = rank_by_spend(&customers, &[]);
        assert_eq!(ranked[0].total_spent, 0);
    }

    #[test]
    fn test_ranking_descending_and_stable() {
        let customers = vec![
            customer("small", None),
            customer("tie_a", None),
            customer("tie_b", None),
            customer("big", None),
        ];
        let payments = vec![
            payment("p1", Some("small"), 10),
            payment("p2", Some("tie_a"), 50),
            payment("p3", Some("tie_b"), 50),
            payment("p4", Some("big"), 100),
        ];

        let ranked = rank_by_spend(&customers, &payments);
        let ids: Vec<&str> = ranked.iter().map(|s| s.customer.id.as_str()).collect();

        // Descending, with the 50/50 tie keeping original relative order.
        assert_eq!(ids, ["big", "tie_a", "tie_b", "small"]);
    }

    #[test]
    fn test_bucket_aggregation() {
        let categorized = vec![
            CategorizedCustomer {
                customer: customer("c1", Some("a@acme.com")),
                total_spent: 100,
                category: "fintech".into(),
            },
            CategorizedCustomer {
                customer: customer("c2", Some("b@bolt.com")),
                total_spent: 200,
                category: "fintech".into(),
            },
        ];

        let buckets = bucket_by_category(&categorized);
        let fintech = &buckets["fintech"];

        assert_eq!(fintech.count, 2);
        assert_eq!(fintech.total_spent, 3.00);
        assert_eq!(
            fintech.customers,
            vec![Some("a@acme.com".to_string()), Some("b@bolt.com".to_string())]
        );
    }

    #[test]
    fn test_buckets_keep_first_seen_order_and_null_emails() {
        let categorized = vec![
            CategorizedCustomer {
                customer: customer("c1", Some("a@acme.com")),
                total_spent: 100,
                category: "fintech".into(),
            },
            CategorizedCustomer {
                customer: customer("c2", None),
                total_spent: 5000,
                category: "logistics".into(),
            },
            CategorizedCustomer {
                customer: customer("c3", Some("c@cargo.io")),
                total_spent: 250,
                category: "logistics".into(),
            },
        ];

        let buckets = bucket_by_category(&categorized);
        let keys: Vec<&str> = buckets.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["fintech", "logistics"]);

        let logistics = &buckets["logistics"];
        assert_eq!(logistics.count, 2);
        assert_eq!(logistics.total_spent, 52.50);
        assert_eq!(
            logistics.customers,
            vec![None, Some("c@cargo.io".to_string())]
        );
    }
}
