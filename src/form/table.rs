use super::renderer::mask;
use crate::core::{EntitySchema, FieldKind};
use crate::schema::SchemaRegistry;
use crate::storage::{RecordId, RecordStore};

pub const ACTIONS_COLUMN: &str = "Actions";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: RecordId,
    pub cells: Vec<String>,
}

/// Aggregate view of one form type's records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub type_name: String,
    /// Field labels in schema order, followed by the actions column.
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl TableView {
    pub fn build(schema: &EntitySchema, store: &RecordStore) -> Self {
        let mut columns: Vec<String> = schema.fields.iter().map(|f| f.label.clone()).collect();
        columns.push(ACTIONS_COLUMN.to_string());

        let rows = store
            .records(&schema.type_name)
            .iter()
            .map(|record| TableRow {
                id: record.id,
                cells: schema
                    .fields
                    .iter()
                    .map(|field| {
                        let value = record.get(&field.name).unwrap_or_default();
                        match field.kind {
                            FieldKind::Secret => mask(value),
                            _ => value.to_string(),
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            type_name: schema.type_name.clone(),
            columns,
            rows,
        }
    }
}

/// One table per registered type that has at least one record, in registry order
pub fn tables(registry: &SchemaRegistry, store: &RecordStore) -> Vec<TableView> {
    registry
        .schemas()
        .iter()
        .filter(|schema| store.len(&schema.type_name) > 0)
        .map(|schema| TableView::build(schema, store))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::samples::{self, PAYMENT_INFORMATION, USER_INFORMATION};
    use crate::storage::values;

    #[test]
    fn test_only_nonempty_types_render() {
        let registry = samples::sample_registry().unwrap();
        let mut store = RecordStore::new();
        assert!(tables(&registry, &store).is_empty());

        store.create(PAYMENT_INFORMATION, values([("cvv", "123")]));
        store.create(USER_INFORMATION, values([("firstName", "Ann")]));

        let views = tables(&registry, &store);
        let names: Vec<_> = views.iter().map(|t| t.type_name.as_str()).collect();
        assert_eq!(names, vec![USER_INFORMATION, PAYMENT_INFORMATION]);
    }

    #[test]
    fn test_columns_and_cells_follow_schema_order() {
        let registry = samples::sample_registry().unwrap();
        let mut store = RecordStore::new();
        let id = store.create(USER_INFORMATION, values([("lastName", "Lee"), ("firstName", "Ann")]));

        let view = TableView::build(registry.describe(USER_INFORMATION).unwrap(), &store);
        assert_eq!(view.columns, vec!["First Name", "Last Name", "Age", "Actions"]);
        assert_eq!(
            view.rows,
            vec![TableRow {
                id,
                cells: vec!["Ann".into(), "Lee".into(), String::new()],
            }]
        );
    }

    #[test]
    fn test_secret_cells_are_masked() {
        let registry = samples::sample_registry().unwrap();
        let mut store = RecordStore::new();
        store.create(PAYMENT_INFORMATION, values([("cvv", "987")]));

        let view = TableView::build(registry.describe(PAYMENT_INFORMATION).unwrap(), &store);
        assert_eq!(view.rows[0].cells[2], "***");
    }
}
