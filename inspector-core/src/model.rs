use crate::item::Item;

/// Structural notifications, always emitted as begin/end pairs around the
/// mutation so views never observe a half-applied change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelChange {
    BeginInsert { first: usize, last: usize },
    EndInsert,
    BeginRemove { first: usize, last: usize },
    EndRemove,
    BeginMove { from: usize, to: usize },
    EndMove,
    DataChanged { row: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropAction {
    Move,
}

/// Ordered rows of items. A row may be a placeholder awaiting its item
/// (inserted ahead of a drop, filled afterwards).
#[derive(Debug, Default)]
pub struct ItemListModel {
    rows: Vec<Option<Item>>,
    changes: Vec<ModelChange>,
}

impl ItemListModel {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            rows: items.into_iter().map(Some).collect(),
            changes: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&Item> {
        self.rows.get(row).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, row: usize) -> Option<&mut Item> {
        self.rows.get_mut(row).and_then(Option::as_mut)
    }

    pub fn is_placeholder(&self, row: usize) -> bool {
        matches!(self.rows.get(row), Some(None))
    }

    /// Text shown for a row; placeholders show nothing.
    pub fn display_name(&self, row: usize) -> Option<String> {
        self.get(row).map(Item::name)
    }

    pub fn is_checked(&self, row: usize) -> bool {
        self.get(row).is_some_and(Item::is_checked)
    }

    /// Flips the check mark of `row`; returns the new state.
    pub fn toggle_checked(&mut self, row: usize) -> Option<bool> {
        let item = self.get_mut(row)?;
        let checked = !item.is_checked();
        item.set_checked(checked);
        self.changes.push(ModelChange::DataChanged { row });
        Some(checked)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.rows.iter().flatten()
    }

    pub fn names(&self) -> Vec<String> {
        self.items().map(Item::name).collect()
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.as_ref().is_some_and(|item| item.name() == name))
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn push(&mut self, item: Item) -> usize {
        self.insert_at(self.rows.len(), item)
    }

    /// Inserts before `row` (clamped to the end); returns the row used.
    pub fn insert_at(&mut self, row: usize, item: Item) -> usize {
        self.insert_row(row, Some(item))
    }

    pub fn insert_placeholder(&mut self, row: usize) -> usize {
        self.insert_row(row, None)
    }

    fn insert_row(&mut self, row: usize, item: Option<Item>) -> usize {
        let row = row.min(self.rows.len());
        self.changes.push(ModelChange::BeginInsert {
            first: row,
            last: row,
        });
        self.rows.insert(row, item);
        self.changes.push(ModelChange::EndInsert);
        row
    }

    /// Puts `item` into a placeholder row. The item is handed back when the
    /// row is not a placeholder.
    pub fn fill_placeholder(&mut self, row: usize, item: Item) -> Result<(), Item> {
        match self.rows.get_mut(row) {
            Some(slot @ None) => {
                *slot = Some(item);
                self.changes.push(ModelChange::DataChanged { row });
                Ok(())
            }
            _ => Err(item),
        }
    }

    /// Removes up to `count` rows starting at `start`; returns how many
    /// rows were actually removed.
    pub fn remove_range(&mut self, start: usize, count: usize) -> usize {
        let end = start.saturating_add(count).min(self.rows.len());
        if start >= end {
            return 0;
        }
        self.changes.push(ModelChange::BeginRemove {
            first: start,
            last: end - 1,
        });
        self.rows.drain(start..end);
        self.changes.push(ModelChange::EndRemove);
        end - start
    }

    /// Moves the row at `from` so that it ends up at index `to`.
    pub fn move_row(&mut self, from: usize, to: usize) -> bool {
        if from >= self.rows.len() {
            return false;
        }
        let to = to.min(self.rows.len() - 1);
        if from == to {
            return false;
        }
        self.changes.push(ModelChange::BeginMove { from, to });
        let row = self.rows.remove(from);
        self.rows.insert(to, row);
        self.changes.push(ModelChange::EndMove);
        true
    }

    /// Reordering by drag and drop only moves rows, never copies them.
    pub fn supported_drop_actions(&self) -> &'static [DropAction] {
        &[DropAction::Move]
    }

    pub fn take_changes(&mut self) -> Vec<ModelChange> {
        std::mem::take(&mut self.changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(names: &[&str]) -> ItemListModel {
        ItemListModel::new(names.iter().map(|n| Item::new(*n, Vec::new())).collect())
    }

    #[test]
    fn remove_is_clamped_and_paired() {
        let mut list = model(&["a", "b", "c"]);
        assert_eq!(list.remove_range(1, 10), 2);
        assert_eq!(
            list.take_changes(),
            [
                ModelChange::BeginRemove { first: 1, last: 2 },
                ModelChange::EndRemove
            ]
        );
        assert_eq!(list.remove_range(5, 1), 0);
        assert!(list.take_changes().is_empty());
        assert_eq!(list.names(), ["a"]);
    }

    #[test]
    fn placeholder_then_fill() {
        let mut list = model(&["a"]);
        let row = list.insert_placeholder(0);
        assert!(list.is_placeholder(row));
        assert_eq!(list.display_name(row), None);
        assert!(list.fill_placeholder(row, Item::new("b", Vec::new())).is_ok());
        assert!(list.fill_placeholder(row, Item::new("c", Vec::new())).is_err());
        assert_eq!(list.names(), ["b", "a"]);
    }

    #[test]
    fn move_reorders_rows() {
        let mut list = model(&["a", "b", "c"]);
        assert!(list.move_row(0, 2));
        assert_eq!(list.names(), ["b", "c", "a"]);
        assert!(!list.move_row(1, 1));
        assert_eq!(list.supported_drop_actions(), [DropAction::Move]);
    }

    #[test]
    fn check_marks_toggle() {
        let mut list = model(&["a"]);
        assert_eq!(list.toggle_checked(0), Some(true));
        assert!(list.is_checked(0));
        assert_eq!(list.toggle_checked(3), None);
    }
}
