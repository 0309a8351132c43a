//! Line-item validation against the catalog.

use catalog::{Catalog, CatalogError};
use common::Money;

use crate::{LineRequest, OrderError, OrderLine};

/// Resolves requested items into priced order lines and a total.
///
/// Validation runs left-to-right and fails fast on the first invalid entry;
/// there is no accumulation of multiple errors. For each entry the quantity
/// must be present and positive, the product must resolve, and its stock
/// must cover the requested quantity. Name and price are snapshotted from
/// the catalog as seen at this moment.
pub async fn resolve_lines<C: Catalog>(
    catalog: &C,
    items: &[LineRequest],
) -> Result<(Vec<OrderLine>, Money), OrderError> {
    if items.is_empty() {
        return Err(OrderError::NoItems);
    }

    let mut lines = Vec::with_capacity(items.len());
    let mut total = Money::zero();

    for item in items {
        let quantity = match item.quantity {
            Some(q) if q > 0 => q,
            _ => {
                return Err(OrderError::InvalidQuantity {
                    product_id: item.product_id.clone(),
                });
            }
        };

        let product = catalog.find_product(&item.product_id).await.map_err(|e| match e {
            CatalogError::NotFound(id) => OrderError::ProductNotFound(id),
            other => OrderError::Catalog(other),
        })?;

        if product.stock < quantity {
            return Err(OrderError::InsufficientStock(item.product_id.clone()));
        }

        total += product.price.multiply(quantity);
        lines.push(OrderLine {
            product_id: product.id,
            name: product.name,
            unit_price: product.price,
            quantity,
        });
    }

    Ok((lines, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{InMemoryCatalog, Product};
    use common::ProductId;

    fn seeded_catalog() -> InMemoryCatalog {
        InMemoryCatalog::with_products([
            Product::new("SKU-001", "Widget", Money::from_cents(1000), 5),
            Product::new("SKU-002", "Gadget", Money::from_cents(500), 10),
        ])
    }

    fn req(product_id: &str, quantity: Option<i64>) -> LineRequest {
        LineRequest {
            product_id: ProductId::new(product_id),
            quantity,
        }
    }

    #[tokio::test]
    async fn resolves_lines_and_total() {
        let catalog = seeded_catalog();

        let (lines, total) = resolve_lines(
            &catalog,
            &[req("SKU-001", Some(3)), req("SKU-002", Some(2))],
        )
        .await
        .unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].name, "Widget");
        assert_eq!(lines[0].unit_price.cents(), 1000);
        assert_eq!(lines[0].quantity, 3);
        assert_eq!(lines[1].name, "Gadget");
        assert_eq!(total.cents(), 4000);
    }

    #[tokio::test]
    async fn empty_request_is_rejected() {
        let catalog = seeded_catalog();

        let err = resolve_lines(&catalog, &[]).await.unwrap_err();
        assert!(matches!(err, OrderError::NoItems));
    }

    #[tokio::test]
    async fn missing_quantity_is_rejected() {
        let catalog = seeded_catalog();

        let err = resolve_lines(&catalog, &[req("SKU-001", None)]).await.unwrap_err();
        assert!(matches!(err, OrderError::InvalidQuantity { .. }));
    }

    #[tokio::test]
    async fn non_positive_quantity_is_rejected() {
        let catalog = seeded_catalog();

        for qty in [0, -1] {
            let err = resolve_lines(&catalog, &[req("SKU-001", Some(qty))])
                .await
                .unwrap_err();
            assert!(matches!(err, OrderError::InvalidQuantity { .. }));
        }
    }

    #[tokio::test]
    async fn unknown_product_is_rejected() {
        let catalog = seeded_catalog();

        let err = resolve_lines(&catalog, &[req("SKU-404", Some(1))])
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::ProductNotFound(ref id) if id.as_str() == "SKU-404"));
    }

    #[tokio::test]
    async fn insufficient_stock_names_the_product() {
        let catalog = seeded_catalog();

        let err = resolve_lines(&catalog, &[req("SKU-001", Some(10))])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Not enough stock for product: SKU-001");
    }

    #[tokio::test]
    async fn fails_fast_on_first_invalid_entry() {
        let catalog = seeded_catalog();

        // The second entry is the first invalid one; the third would be a
        // different failure but is never reached.
        let err = resolve_lines(
            &catalog,
            &[
                req("SKU-001", Some(1)),
                req("SKU-404", Some(1)),
                req("SKU-002", Some(0)),
            ],
        )
        .await
        .unwrap_err();
        assert!(matches!(err, OrderError::ProductNotFound(_)));
    }

    #[tokio::test]
    async fn quantity_equal_to_stock_is_allowed() {
        let catalog = seeded_catalog();

        let (lines, total) = resolve_lines(&catalog, &[req("SKU-001", Some(5))])
            .await
            .unwrap();
        assert_eq!(lines[0].quantity, 5);
        assert_eq!(total.cents(), 5000);
    }
}
