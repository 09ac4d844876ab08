//! End-to-end list scenarios: search, filters, sort and load-more together.

use roster::{
    Dir, FieldFilter, FilterValue, ListConfig, ListQueryEngine, Listable, Number, Op, SortKey,
    Value,
};

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Debug, Clone)]
struct Item {
    id: i64,
    name: String,
}

impl Listable for Item {
    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::Number(Number::I64(self.id)),
            "name" => Value::String(&self.name),
            _ => Value::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemSort {
    Id,
    Name,
}

impl SortKey for ItemSort {
    fn field(&self) -> &'static str {
        match self {
            ItemSort::Id => "id",
            ItemSort::Name => "name",
        }
    }
}

fn items(n: i64) -> Vec<Item> {
    (1..=n)
        .map(|id| Item {
            id,
            name: format!("item-{id:02}"),
        })
        .collect()
}

fn item_list(page_size: usize) -> ListQueryEngine<Item, ItemSort> {
    let config = ListConfig::builder(ItemSort::Id)
        .search_text("name")
        .search_numeric("id")
        .page_size(page_size)
        .build()
        .unwrap();
    ListQueryEngine::new(config)
}

fn names(rows: &[&Item]) -> Vec<String> {
    rows.iter().map(|i| i.name.clone()).collect()
}

#[derive(Debug, Clone)]
struct Lead {
    id: u32,
    name: String,
    is_won: bool,
    is_lost: bool,
    company: Option<String>,
}

impl Listable for Lead {
    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::Number(Number::from(self.id)),
            "name" => Value::String(&self.name),
            "is_won" => Value::Bool(self.is_won),
            "company" => self.company.as_deref().into(),
            _ => Value::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeadSort {
    Id,
    Company,
    Won,
}

impl SortKey for LeadSort {
    fn field(&self) -> &'static str {
        match self {
            LeadSort::Id => "id",
            LeadSort::Company => "company",
            LeadSort::Won => "is_won",
        }
    }
}

fn lead(id: u32, name: &str, is_won: bool, is_lost: bool, company: Option<&str>) -> Lead {
    Lead {
        id,
        name: name.to_string(),
        is_won,
        is_lost,
        company: company.map(str::to_string),
    }
}

fn leads() -> Vec<Lead> {
    vec![
        lead(1, "Acme renewal", true, false, Some("Acme")),
        lead(2, "Acme upsell", false, true, Some("Acme")),
        lead(3, "Globex pilot", true, false, None),
        lead(4, "Initech intro", false, false, Some("initech")),
        lead(5, "Acme support", false, false, Some("Acme")),
        lead(6, "Umbrella deal", true, false, Some("Umbrella")),
    ]
}

fn status_filter() -> FieldFilter<Lead> {
    FieldFilter::custom("status", |lead: &Lead, value: &FilterValue| {
        match value.as_str() {
            Some("won") => lead.is_won,
            Some("lost") => lead.is_lost,
            Some("neutral") => !lead.is_won && !lead.is_lost,
            _ => true,
        }
    })
}

fn lead_list() -> ListQueryEngine<Lead, LeadSort> {
    let config = ListConfig::builder(LeadSort::Id)
        .search_text("name")
        .search_text("company")
        .search_numeric("id")
        .filter(status_filter())
        .filter(FieldFilter::clause("id", "id", Op::Eq))
        .page_size(10)
        .build()
        .unwrap();
    ListQueryEngine::new(config)
}

fn lead_ids(rows: &[&Lead]) -> Vec<u32> {
    rows.iter().map(|l| l.id).collect()
}

// ============================================================================
// Incremental window
// ============================================================================

#[test]
fn thirty_items_page_then_search() {
    let records = items(30);
    let mut list = item_list(10);

    let view = list.compute_view(&records);
    assert_eq!(view.len(), 10);
    assert_eq!(view[0].name, "item-01");

    assert_eq!(list.load_more(&records), 10);
    let view = list.compute_view(&records);
    assert_eq!(view.len(), 20);
    assert_eq!(
        names(&view),
        (1..=20).map(|i| format!("item-{i:02}")).collect::<Vec<_>>()
    );

    list.set_search_term("item-2");
    assert_eq!(list.visible_count(), 10);
    let view = list.compute_view(&records);
    assert_eq!(
        names(&view),
        (20..=29).map(|i| format!("item-{i}")).collect::<Vec<_>>()
    );
    assert!(!list.has_more(&records));
}

#[test]
fn view_length_is_min_of_window_and_filtered() {
    let records = items(7);
    let mut list = item_list(5);
    assert_eq!(list.compute_view(&records).len(), 5);

    list.load_more(&records);
    assert_eq!(list.visible_count(), 7);
    assert_eq!(list.compute_view(&records).len(), 7);

    list.set_search_term("item-0");
    assert_eq!(list.compute_view(&records).len(), 5);
}

#[test]
fn load_more_when_exhausted_is_noop() {
    let records = items(4);
    let mut list = item_list(10);

    let before = list.compute_view(&records).len();
    assert_eq!(list.load_more(&records), 0);
    assert_eq!(list.visible_count(), 10);
    assert_eq!(list.compute_view(&records).len(), before);
    assert!(!list.is_loading_more());
}

#[test]
fn sort_change_resets_window_even_when_filtered_set_is_small() {
    let records = items(30);
    let mut list = item_list(10);
    list.load_more(&records);
    list.load_more(&records);
    assert_eq!(list.visible_count(), 30);

    list.set_sort(ItemSort::Name);
    assert_eq!(list.visible_count(), 10);

    list.load_more(&records);
    list.set_search_term("item-3");
    list.set_sort(ItemSort::Name);
    assert_eq!(list.sort_dir(), Dir::Desc);
    assert_eq!(list.visible_count(), 10);
    assert_eq!(list.compute_view(&records).len(), 1);
}

#[test]
fn filter_changes_reset_window() {
    let records: Vec<Lead> = (1..=60)
        .map(|id| lead(id, &format!("lead {id}"), id % 3 == 0, id % 3 == 1, None))
        .collect();
    let mut list = lead_list();

    list.load_more(&records);
    list.load_more(&records);
    assert_eq!(list.visible_count(), 30);

    list.set_field_filter("status", Some("won")).unwrap();
    assert_eq!(list.visible_count(), 10);
    assert_eq!(list.compute_view(&records).len(), 10);

    list.set_field_filter("status", Some("neutral")).unwrap();
    list.load_more(&records);
    assert_eq!(list.visible_count(), 20);
    list.set_field_filter("status", Some("won")).unwrap();
    assert_eq!(list.visible_count(), 10);

    list.set_search_term("lead");
    assert_eq!(list.visible_count(), 10);
    list.load_more(&records);
    assert_eq!(list.visible_count(), 20);
    list.clear_field_filter("status").unwrap();
    assert_eq!(list.visible_count(), 10);
    list.load_more(&records);
    assert_eq!(list.visible_count(), 20);

    list.clear_filters();
    assert_eq!(list.visible_count(), 10);
    assert_eq!(list.compute_view(&records).len(), 10);
    assert!(list.has_more(&records));
}

#[test]
fn compute_view_is_repeatable() {
    let records = items(25);
    let mut list = item_list(10);
    list.set_search_term("1");
    list.set_sort(ItemSort::Name);

    let first = names(&list.compute_view(&records));
    let second = names(&list.compute_view(&records));
    assert_eq!(first, second);
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn equal_keys_keep_input_order() {
    let records = vec![
        Item {
            id: 1,
            name: "A".to_string(),
        },
        Item {
            id: 2,
            name: "A".to_string(),
        },
    ];
    let mut list = item_list(10);
    list.set_sort(ItemSort::Name);

    let ids: Vec<i64> = list.compute_view(&records).iter().map(|i| i.id).collect();
    assert_eq!(ids, [1, 2]);
}

#[test]
fn null_company_sorts_as_empty_string() {
    let records = leads();
    let mut list = lead_list();
    list.set_sort(LeadSort::Company);

    let view = list.compute_view(&records);
    assert_eq!(lead_ids(&view), [3, 1, 2, 5, 4, 6]);
}

#[test]
fn booleans_sort_false_first() {
    let records = leads();
    let mut list = lead_list();
    list.set_sort(LeadSort::Won);
    assert_eq!(lead_ids(&list.compute_view(&records)), [2, 4, 5, 1, 3, 6]);

    list.set_sort(LeadSort::Won);
    assert_eq!(lead_ids(&list.compute_view(&records)), [1, 3, 6, 2, 4, 5]);
}

#[test]
fn nan_score_sorts_last_without_disturbing_the_rest() {
    struct Scored {
        id: u32,
        score: f64,
    }

    impl Listable for Scored {
        fn field_value(&self, field: &str) -> Value<'_> {
            match field {
                "score" => Value::Number(Number::F64(self.score)),
                _ => Value::Number(Number::from(self.id)),
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct ByScore;

    impl SortKey for ByScore {
        fn field(&self) -> &'static str {
            "score"
        }
    }

    let records: Vec<Scored> = [5.0, 3.0, f64::NAN, 1.0, 4.0, 2.0]
        .into_iter()
        .enumerate()
        .map(|(i, score)| Scored { id: i as u32, score })
        .collect();
    let config = ListConfig::builder(ByScore).page_size(10).build().unwrap();
    let mut list = ListQueryEngine::new(config);

    let ids: Vec<u32> = list.compute_view(&records).iter().map(|r| r.id).collect();
    assert_eq!(ids, [3, 5, 1, 4, 0, 2]);

    list.set_sort(ByScore);
    let ids: Vec<u32> = list.compute_view(&records).iter().map(|r| r.id).collect();
    assert_eq!(ids, [2, 0, 4, 1, 5, 3]);
}

// ============================================================================
// Filters and search
// ============================================================================

#[test]
fn status_filter_keeps_only_won() {
    let records = leads();
    let mut list = lead_list();
    list.set_field_filter("status", Some("won")).unwrap();

    let view = list.compute_view(&records);
    assert_eq!(lead_ids(&view), [1, 3, 6]);
    assert!(view.iter().all(|l| l.is_won));
}

#[test]
fn status_filter_and_search_are_anded() {
    let records = leads();
    let mut list = lead_list();
    list.set_field_filter("status", Some("won")).unwrap();
    list.set_search_term("acme");

    assert_eq!(lead_ids(&list.compute_view(&records)), [1]);

    list.set_field_filter("status", Some("neutral")).unwrap();
    assert_eq!(lead_ids(&list.compute_view(&records)), [5]);
}

#[test]
fn numeric_id_filter_inactive_when_none() {
    let records = leads();
    let mut list = lead_list();

    list.set_field_filter("id", Some(4u32)).unwrap();
    assert_eq!(lead_ids(&list.compute_view(&records)), [4]);

    list.set_field_filter::<u32>("id", None).unwrap();
    assert_eq!(list.compute_view(&records).len(), 6);
}

#[test]
fn search_matches_any_text_field() {
    let records = leads();
    let mut list = lead_list();

    list.set_search_term("INITECH");
    assert_eq!(lead_ids(&list.compute_view(&records)), [4]);

    list.set_search_term("umbrella");
    assert_eq!(lead_ids(&list.compute_view(&records)), [6]);
}

#[test]
fn numeric_search_is_substring_of_id() {
    let records: Vec<Item> = [1, 12, 120, 21]
        .into_iter()
        .map(|id| Item {
            id,
            name: format!("row {}", ["a", "b", "c", "d"][(id % 4) as usize]),
        })
        .collect();
    let mut list = item_list(10);

    list.set_search_term("12");
    let ids: Vec<i64> = list.compute_view(&records).iter().map(|i| i.id).collect();
    assert_eq!(ids, [12, 120]);

    list.set_search_term("row");
    assert_eq!(list.compute_view(&records).len(), 4);

    // a non-numeric term never reaches the id field
    list.set_search_term("1a");
    assert!(list.compute_view(&records).is_empty());
}

#[test]
fn blank_search_clears_text_filtering() {
    let records = items(12);
    let mut list = item_list(20);
    list.set_search_term("item-1");
    assert_eq!(list.compute_view(&records).len(), 3);

    list.set_search_term("   ");
    assert_eq!(list.search_term(), "");
    assert_eq!(list.compute_view(&records).len(), 12);
}

// ============================================================================
// Delayed load-more
// ============================================================================

#[test]
fn delayed_batch_applies_to_current_records() {
    let mut records = items(15);
    let mut list = item_list(10);

    let ticket = list.begin_load_more(&records).unwrap();
    assert!(list.snapshot(&records).loading_more);

    records.extend(items(30).into_iter().skip(15));
    assert_eq!(list.complete_load_more(ticket, &records), 10);
    assert_eq!(list.compute_view(&records).len(), 20);
}

#[test]
fn delayed_batch_superseded_by_sort() {
    let records = items(30);
    let mut list = item_list(10);

    let ticket = list.begin_load_more(&records).unwrap();
    list.set_sort(ItemSort::Name);
    assert_eq!(list.complete_load_more(ticket, &records), 0);
    assert_eq!(list.compute_view(&records).len(), 10);
    assert!(!list.is_loading_more());
}

#[test]
fn delayed_batch_superseded_by_filter_change() {
    let records: Vec<Lead> = (1..=30)
        .map(|id| lead(id, "lead", id % 2 == 0, false, None))
        .collect();
    let mut list = lead_list();

    let ticket = list.begin_load_more(&records).unwrap();
    list.set_field_filter("status", Some("won")).unwrap();
    assert!(!list.is_loading_more());
    assert_eq!(list.complete_load_more(ticket, &records), 0);
    assert_eq!(list.visible_count(), 10);

    let ticket = list.begin_load_more(&records).unwrap();
    list.clear_field_filter("status").unwrap();
    assert_eq!(list.complete_load_more(ticket, &records), 0);

    let ticket = list.begin_load_more(&records).unwrap();
    list.clear_filters();
    assert_eq!(list.complete_load_more(ticket, &records), 0);
    assert_eq!(list.compute_view(&records).len(), 10);
}

#[test]
fn snapshot_serializes_for_host() {
    #[derive(serde::Serialize)]
    struct Row<'a> {
        id: u32,
        name: &'a str,
    }

    let records = leads();
    let mut list = lead_list();
    list.set_field_filter("status", Some("won")).unwrap();

    let view = list
        .snapshot(&records)
        .map(|l| Row { id: l.id, name: &l.name });
    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["items"][0]["name"], "Acme renewal");
    assert_eq!(json["filtered_count"], 3);
    assert_eq!(json["total_count"], 6);
    assert_eq!(json["has_more"], false);
    assert_eq!(json["sort"]["field"], "id");
    assert_eq!(json["filter_summary"], "status='won'");
}
