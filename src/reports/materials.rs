//! Materials grouping: join item-request rows to their catalog item and
//! order, then partition into the seven fixed category buckets.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::models::{Item, ItemRequest, Order};

/// Closed set of material categories. Any row whose `Category` column is not
/// one of the first six names is attributed to `Others`. Output order is the
/// declaration order, regardless of which buckets have data.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Category {
    #[serde(rename = "Top hat")]
    #[strum(serialize = "Top hat")]
    TopHat,
    Angles,
    Screws,
    #[serde(rename = "Caulking Glue")]
    #[strum(serialize = "Caulking Glue")]
    CaulkingGlue,
    Packers,
    Tapes,
    Others,
}

impl Category {
    /// Bucket a raw category name, falling back to `Others` for anything
    /// unrecognized.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Top hat" => Category::TopHat,
            "Angles" => Category::Angles,
            "Screws" => Category::Screws,
            "Caulking Glue" => Category::CaulkingGlue,
            "Packers" => Category::Packers,
            "Tapes" => Category::Tapes,
            _ => Category::Others,
        }
    }
}

/// One merged summary line: all requests for the same item id within a
/// category collapse into a single entry whose `total` is the running sum of
/// quantities. The joined order fields come from the first-seen request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub item_id: String,
    pub item_name: String,
    pub specification: String,
    pub order_number: String,
    pub due_date: String,
    pub status: String,
    pub requested_by: String,
    pub total: f64,
}

/// One request row kept individually, enriched with the same joined fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailEntry {
    pub item_request_id: String,
    pub item_id: String,
    pub item_name: String,
    pub specification: String,
    pub sub_category: String,
    pub order_number: String,
    pub due_date: String,
    pub status: String,
    pub requested_by: String,
    pub quantity: f64,
}

/// A category bucket and its entries, in fixed category order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup<T> {
    pub category: Category,
    pub entries: Vec<T>,
}

struct Joined<'a> {
    item: Option<&'a Item>,
    order: Option<&'a Order>,
}

/// Index the secondary collections by key up front so the join stays O(n+m)
/// instead of O(n*m).
fn join_indexes<'a>(
    items: &'a [Item],
    orders: &'a [Order],
) -> (HashMap<&'a str, &'a Item>, HashMap<&'a str, &'a Order>) {
    let items_by_id = items.iter().map(|i| (i.item_id.as_str(), i)).collect();
    let orders_by_id = orders.iter().map(|o| (o.order_id.as_str(), o)).collect();
    (items_by_id, orders_by_id)
}

fn join<'a>(
    request: &ItemRequest,
    items_by_id: &HashMap<&'a str, &'a Item>,
    orders_by_id: &HashMap<&'a str, &'a Order>,
) -> Joined<'a> {
    Joined {
        item: items_by_id.get(request.item_id.as_str()).copied(),
        order: orders_by_id.get(request.order_id.as_str()).copied(),
    }
}

/// Summary view: one entry per item id per category, quantities summed.
pub fn summarize(
    requests: &[ItemRequest],
    items: &[Item],
    orders: &[Order],
) -> Vec<CategoryGroup<SummaryEntry>> {
    let (items_by_id, orders_by_id) = join_indexes(items, orders);

    // Per category: entries in first-seen order, plus an index by item id so
    // repeated ids merge into one running total.
    let mut buckets: HashMap<Category, (Vec<SummaryEntry>, HashMap<String, usize>)> =
        HashMap::new();

    for request in requests {
        let category = Category::from_label(&request.category);
        let (entries, index) = buckets.entry(category).or_default();

        if let Some(&at) = index.get(&request.item_id) {
            entries[at].total += request.quantity;
            continue;
        }

        let joined = join(request, &items_by_id, &orders_by_id);
        entries.push(SummaryEntry {
            item_id: request.item_id.clone(),
            item_name: joined.item.map(|i| i.name.clone()).unwrap_or_default(),
            specification: joined
                .item
                .map(|i| i.specification.clone())
                .unwrap_or_default(),
            order_number: joined
                .order
                .map(|o| o.order_number.clone())
                .unwrap_or_default(),
            due_date: joined.order.map(|o| o.due_date.clone()).unwrap_or_default(),
            status: joined.order.map(|o| o.status.clone()).unwrap_or_default(),
            requested_by: joined
                .order
                .map(|o| o.requested_by.clone())
                .unwrap_or_default(),
            total: request.quantity,
        });
        index.insert(request.item_id.clone(), entries.len() - 1);
    }

    Category::iter()
        .map(|category| CategoryGroup {
            category,
            entries: buckets
                .remove(&category)
                .map(|(entries, _)| entries)
                .unwrap_or_default(),
        })
        .collect()
}

/// Detail view: same category partition, rows kept individually.
pub fn detail(
    requests: &[ItemRequest],
    items: &[Item],
    orders: &[Order],
) -> Vec<CategoryGroup<DetailEntry>> {
    let (items_by_id, orders_by_id) = join_indexes(items, orders);

    let mut buckets: HashMap<Category, Vec<DetailEntry>> = HashMap::new();

    for request in requests {
        let category = Category::from_label(&request.category);
        let joined = join(request, &items_by_id, &orders_by_id);
        buckets.entry(category).or_default().push(DetailEntry {
            item_request_id: request.item_request_id.clone(),
            item_id: request.item_id.clone(),
            item_name: joined.item.map(|i| i.name.clone()).unwrap_or_default(),
            specification: joined
                .item
                .map(|i| i.specification.clone())
                .unwrap_or_default(),
            sub_category: request.sub_category.clone(),
            order_number: joined
                .order
                .map(|o| o.order_number.clone())
                .unwrap_or_default(),
            due_date: joined.order.map(|o| o.due_date.clone()).unwrap_or_default(),
            status: joined.order.map(|o| o.status.clone()).unwrap_or_default(),
            requested_by: joined
                .order
                .map(|o| o.requested_by.clone())
                .unwrap_or_default(),
            quantity: request.quantity,
        });
    }

    Category::iter()
        .map(|category| CategoryGroup {
            category,
            entries: buckets.remove(&category).unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn request(id: &str, item: &str, order: &str, category: &str, qty: f64) -> ItemRequest {
        ItemRequest {
            item_request_id: id.to_string(),
            project_id: "Tower B".to_string(),
            order_id: order.to_string(),
            item_id: item.to_string(),
            category: category.to_string(),
            sub_category: String::new(),
            quantity: qty,
        }
    }

    fn item(id: &str, name: &str) -> Item {
        Item {
            item_id: id.to_string(),
            name: name.to_string(),
            specification: format!("{name} spec"),
        }
    }

    fn order(id: &str, number: &str) -> Order {
        Order {
            order_id: id.to_string(),
            project_id: "Tower B".to_string(),
            order_number: number.to_string(),
            due_date: "1/6/2024".to_string(),
            status: "Open".to_string(),
            requested_by: "R. Chen".to_string(),
        }
    }

    #[test]
    fn merges_same_item_id_within_category() {
        let requests = vec![
            request("r1", "it-1", "o-1", "Angles", 50.0),
            request("r2", "it-1", "o-2", "Angles", 30.0),
        ];
        let groups = summarize(&requests, &[item("it-1", "Wall angle")], &[order("o-1", "PO-7")]);

        let angles = groups
            .iter()
            .find(|g| g.category == Category::Angles)
            .unwrap();
        assert_eq!(angles.entries.len(), 1);
        assert_eq!(angles.entries[0].total, 80.0);
        // joined fields come from the first-seen row
        assert_eq!(angles.entries[0].order_number, "PO-7");
        assert_eq!(angles.entries[0].item_name, "Wall angle");
    }

    #[test]
    fn unknown_category_lands_in_others() {
        let requests = vec![request("r1", "it-9", "o-1", "Unknown Category", 4.0)];
        let groups = summarize(&requests, &[], &[]);

        let others = groups
            .iter()
            .find(|g| g.category == Category::Others)
            .unwrap();
        assert_eq!(others.entries.len(), 1);
        assert_eq!(others.entries[0].item_id, "it-9");
    }

    #[test]
    fn category_order_is_fixed_and_complete() {
        let groups = summarize(&[request("r1", "it-1", "o-1", "Tapes", 1.0)], &[], &[]);
        let labels: Vec<String> = groups.iter().map(|g| g.category.to_string()).collect();
        assert_eq!(
            labels,
            vec![
                "Top hat",
                "Angles",
                "Screws",
                "Caulking Glue",
                "Packers",
                "Tapes",
                "Others"
            ]
        );
    }

    #[test]
    fn detail_keeps_rows_individually() {
        let requests = vec![
            request("r1", "it-1", "o-1", "Screws", 100.0),
            request("r2", "it-1", "o-1", "Screws", 200.0),
        ];
        let groups = detail(&requests, &[], &[]);
        let screws = groups
            .iter()
            .find(|g| g.category == Category::Screws)
            .unwrap();
        assert_eq!(screws.entries.len(), 2);
        assert_eq!(screws.entries[1].quantity, 200.0);
    }

    #[test]
    fn missing_joins_degrade_to_empty_fields() {
        let groups = detail(&[request("r1", "ghost", "ghost", "Packers", 2.0)], &[], &[]);
        let packers = groups
            .iter()
            .find(|g| g.category == Category::Packers)
            .unwrap();
        assert_eq!(packers.entries[0].item_name, "");
        assert_eq!(packers.entries[0].order_number, "");
    }

    #[test]
    fn category_serializes_to_display_label() {
        let json = serde_json::to_string(&Category::TopHat).unwrap();
        assert_eq!(json, r#""Top hat""#);
        let json = serde_json::to_string(&Category::CaulkingGlue).unwrap();
        assert_eq!(json, r#""Caulking Glue""#);
    }

    proptest! {
        /// The category partition neither loses nor duplicates quantity: the
        /// sum of summary totals equals the sum of input quantities.
        #[test]
        fn summary_totals_preserve_quantity_sum(
            rows in proptest::collection::vec(
                (0usize..6, 0usize..4, prop::sample::select(vec![
                    "Top hat", "Angles", "Screws", "Caulking Glue",
                    "Packers", "Tapes", "Shims", "",
                ]), 0.0f64..1000.0),
                0..40,
            )
        ) {
            let requests: Vec<ItemRequest> = rows
                .iter()
                .enumerate()
                .map(|(i, (item_n, order_n, category, qty))| request(
                    &format!("r{i}"),
                    &format!("it-{item_n}"),
                    &format!("o-{order_n}"),
                    category,
                    *qty,
                ))
                .collect();

            let input_sum: f64 = requests.iter().map(|r| r.quantity).sum();
            let groups = summarize(&requests, &[], &[]);
            let output_sum: f64 = groups
                .iter()
                .flat_map(|g| g.entries.iter())
                .map(|e| e.total)
                .sum();

            prop_assert!((input_sum - output_sum).abs() < 1e-6);
        }
    }
}
