use crate::binding::BindingHost;
use crate::error::ManagerError;
use crate::item::Item;
use crate::model::ItemListModel;
use crate::panel::PropertyPanel;
use crate::registry::{CreationArgs, ItemRegistry, NameGenerator};
use crate::settings::ManagerSettings;
use records::{DecodedRecords, ItemRecord};
use std::path::Path;

/// Result of an operation the user may abort from a file chooser.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Done(T),
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    pub fn done(self) -> Option<T> {
        match self {
            Outcome::Done(value) => Some(value),
            Outcome::Cancelled => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub index: usize,
    pub type_name: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedRecord>,
}

pub type SelectionCallback = Box<dyn FnMut(usize, &Item)>;

/// Owns an ordered item collection, its current selection and the property
/// panel of the selected item.
pub struct CollectionManager {
    settings: ManagerSettings,
    model: ItemListModel,
    registry: ItemRegistry,
    creation: CreationArgs,
    type_selection: usize,
    current: Option<usize>,
    panel: Option<PropertyPanel>,
    host: BindingHost,
    on_select: Option<SelectionCallback>,
}

impl CollectionManager {
    pub fn new(registry: ItemRegistry, settings: ManagerSettings) -> Self {
        Self {
            settings,
            model: ItemListModel::default(),
            registry,
            creation: CreationArgs::default(),
            type_selection: 0,
            current: None,
            panel: None,
            host: BindingHost::default(),
            on_select: None,
        }
    }

    pub fn with_host(mut self, host: BindingHost) -> Self {
        self.host = host;
        self
    }

    pub fn with_name_generator(
        mut self,
        generator: impl Fn(&str, i64) -> Option<String> + 'static,
    ) -> Self {
        let generator: NameGenerator = std::rc::Rc::new(generator);
        self.creation.name_generator = Some(generator);
        self
    }

    pub fn with_creation_args(mut self, args: CreationArgs) -> Self {
        self.creation = args;
        self
    }

    /// Starts with `items` and selects the first one.
    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        for item in items {
            self.model.push(item);
        }
        self.model.take_changes();
        if !self.model.is_empty() {
            self.select(0);
        }
        self
    }

    pub fn set_on_select(&mut self, callback: impl FnMut(usize, &Item) + 'static) {
        self.on_select = Some(Box::new(callback));
    }

    pub fn title(&self) -> &str {
        &self.settings.title
    }

    pub fn settings(&self) -> &ManagerSettings {
        &self.settings
    }

    pub fn model(&self) -> &ItemListModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut ItemListModel {
        &mut self.model
    }

    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.model.items()
    }

    pub fn names(&self) -> Vec<String> {
        self.model.names()
    }

    pub fn len(&self) -> usize {
        self.model.row_count()
    }

    pub fn is_empty(&self) -> bool {
        self.model.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.model.find(name)
    }

    pub fn checked_items(&self) -> Vec<&Item> {
        self.model.items().filter(|item| item.is_checked()).collect()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.current.and_then(|row| self.model.get(row))
    }

    pub fn panel(&self) -> Option<&PropertyPanel> {
        self.panel.as_ref()
    }

    /// Whether the type selector is shown (more than one registered type).
    pub fn has_type_selector(&self) -> bool {
        self.registry.len() > 1
    }

    pub fn type_selection(&self) -> usize {
        self.type_selection
    }

    pub fn current_type_key(&self) -> Option<&str> {
        self.registry.key(self.type_selection)
    }

    pub fn select_type(&mut self, key: &str) -> bool {
        match self.registry.index_of_key(key) {
            Some(index) => {
                self.type_selection = index;
                true
            }
            None => false,
        }
    }

    pub fn select_type_index(&mut self, index: usize) -> bool {
        if index < self.registry.len() {
            self.type_selection = index;
            true
        } else {
            false
        }
    }

    /// Makes `row` current: the old panel is torn down before the new one is
    /// built, then the selection callback runs.
    pub fn select(&mut self, row: usize) -> bool {
        let Some(item) = self.model.get(row) else {
            return false;
        };
        if let Some(mut panel) = self.panel.take() {
            panel.close();
        }
        self.panel = Some(PropertyPanel::build(&item.panel_nodes(), &self.host));
        self.current = Some(row);
        if let Some(callback) = self.on_select.as_mut() {
            callback(row, item);
        }
        true
    }

    pub fn clear_selection(&mut self) {
        if let Some(mut panel) = self.panel.take() {
            panel.close();
        }
        self.current = None;
    }

    /// Creates an item of `type_key` (or the selected type) and selects it.
    /// Returns the row of the new item, or of the existing item with the
    /// same name when existing items are reused.
    pub fn add(&mut self, type_key: Option<&str>, name: Option<&str>) -> Result<usize, ManagerError> {
        if self.registry.is_empty() {
            return Err(ManagerError::NoItemTypes);
        }
        let index = match type_key {
            Some(key) => self
                .registry
                .index_of_key(key)
                .ok_or_else(|| ManagerError::UnknownKey(key.to_string()))?,
            None => self.type_selection,
        };
        let mut args = self.creation.clone();
        if let Some(name) = name {
            args.name = Some(name.to_string());
        } else if args.name.is_none() && self.has_type_selector() {
            args.name = self.registry.key(index).map(str::to_string);
        }
        let item = self.registry.create(index, &args).map_err(|err| {
            log::error!("add failed: {err}");
            err
        })?;

        if !self.settings.add_existing_items {
            if let Some(existing) = self.model.find(&item.name()) {
                log::info!("'{}' already exists, selecting it", item.name());
                self.select(existing);
                return Ok(existing);
            }
        }
        Ok(self.insert_new(item))
    }

    /// Copies the item at `row` (construction name and parameter values)
    /// into a new item of the same type, then selects it.
    pub fn duplicate(&mut self, row: usize) -> Result<usize, ManagerError> {
        let source = self.model.get(row).ok_or(ManagerError::NoSuchRow(row))?;
        let record = source.to_record();
        let index = self
            .registry
            .index_of_type(&record.type_name)
            .ok_or_else(|| ManagerError::UnknownType(record.type_name.clone()))?;
        let mut args = self.creation.clone();
        args.name = Some(record.name.clone());
        let item = self.registry.create(index, &args).map_err(|err| {
            log::error!("duplicate failed: {err}");
            err
        })?;
        for issue in item.restore_parameters(&record.parameters) {
            log::warn!("duplicate of '{}': {issue}", record.name);
        }
        Ok(self.insert_new(item))
    }

    /// Removes the current row; no-op without a selection.
    pub fn remove(&mut self) -> bool {
        match self.current {
            Some(row) => self.remove_row(row),
            None => false,
        }
    }

    pub fn remove_row(&mut self, row: usize) -> bool {
        if row >= self.model.row_count() {
            return false;
        }
        match self.current {
            Some(current) if current == row => self.clear_selection(),
            Some(current) if current > row => self.current = Some(current - 1),
            _ => {}
        }
        self.model.remove_range(row, 1) == 1
    }

    /// Moves an item; the current selection follows its item.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if !self.model.move_row(from, to) {
            return false;
        }
        let to = to.min(self.model.row_count() - 1);
        if let Some(current) = self.current {
            self.current = Some(if current == from {
                to
            } else if from < current && current <= to {
                current - 1
            } else if to <= current && current < from {
                current + 1
            } else {
                current
            });
        }
        true
    }

    /// Find-or-create: integers go through the name generator first, then
    /// the name is looked up, and a missing item is created under it.
    /// Blank text does nothing.
    pub fn search(&mut self, text: &str) -> Result<Option<usize>, ManagerError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let name = self.resolve_search_name(text);
        if let Some(row) = self.model.find(&name) {
            self.select(row);
            return Ok(Some(row));
        }
        self.add(None, Some(&name)).map(Some)
    }

    fn resolve_search_name(&self, text: &str) -> String {
        if let (Some(generator), Ok(number)) = (&self.creation.name_generator, text.parse::<i64>()) {
            let key = self.current_type_key().unwrap_or_default();
            if let Some(name) = generator(key, number) {
                return name;
            }
        }
        text.to_string()
    }

    pub fn records(&self) -> Vec<ItemRecord> {
        self.model.items().map(Item::to_record).collect()
    }

    /// Writes every item to `destination`. `None` or an empty path means
    /// the user cancelled the chooser.
    pub fn save(&self, destination: Option<&Path>) -> Result<Outcome<usize>, ManagerError> {
        let Some(path) = destination.filter(|p| !p.as_os_str().is_empty()) else {
            log::debug!("save cancelled");
            return Ok(Outcome::Cancelled);
        };
        let records = self.records();
        records::save_to_file(&records, path)?;
        log::info!("saved {} item(s) to {}", records.len(), path.display());
        Ok(Outcome::Done(records.len()))
    }

    /// Appends the items stored at `source`. Records that cannot be turned
    /// into items are skipped and listed in the report.
    pub fn load(&mut self, source: Option<&Path>) -> Result<Outcome<LoadReport>, ManagerError> {
        let Some(path) = source.filter(|p| !p.as_os_str().is_empty()) else {
            log::debug!("load cancelled");
            return Ok(Outcome::Cancelled);
        };
        let decoded = records::load_from_file(path)?;
        let report = self.import(decoded);
        log::info!(
            "loaded {} item(s) from {}, skipped {}",
            report.loaded,
            path.display(),
            report.skipped.len()
        );
        Ok(Outcome::Done(report))
    }

    pub fn import(&mut self, decoded: DecodedRecords) -> LoadReport {
        let mut report = LoadReport {
            loaded: 0,
            skipped: decoded
                .issues
                .into_iter()
                .map(|issue| SkippedRecord {
                    index: issue.index,
                    type_name: None,
                    reason: issue.message,
                })
                .collect(),
        };
        for (index, record) in decoded.records {
            match self.item_from_record(&record) {
                Ok(item) => {
                    self.resolve_name_collision(&item);
                    self.model.push(item);
                    report.loaded += 1;
                }
                Err(err) => {
                    log::warn!("skipping record #{index} '{}': {err}", record.name);
                    report.skipped.push(SkippedRecord {
                        index,
                        type_name: Some(record.type_name.clone()),
                        reason: err.to_string(),
                    });
                }
            }
        }
        report.skipped.sort_by_key(|skipped| skipped.index);
        report
    }

    fn item_from_record(&self, record: &ItemRecord) -> Result<Item, ManagerError> {
        let index = self
            .registry
            .index_of_type(&record.type_name)
            .ok_or_else(|| ManagerError::UnknownType(record.type_name.clone()))?;
        let mut args = self.creation.clone();
        args.name = Some(record.name.clone());
        let item = self.registry.create(index, &args)?;
        if item.name() != record.name {
            item.name_parameter().set_value_silent(record.name.as_str());
        }
        for issue in item.restore_parameters(&record.parameters) {
            log::warn!("item '{}': {issue}", record.name);
        }
        Ok(item)
    }

    fn insert_new(&mut self, item: Item) -> usize {
        self.resolve_name_collision(&item);
        let row = self.model.push(item);
        self.select(row);
        row
    }

    fn resolve_name_collision(&self, item: &Item) {
        if !self.settings.force_unique_names {
            return;
        }
        let base = item.name();
        let mut candidate = base.clone();
        let mut counter = 1;
        while self.model.contains_name(&candidate) {
            candidate = format!("{base} - {counter}");
            counter += 1;
        }
        if candidate != base {
            item.rename(&candidate);
        }
    }
}

impl std::fmt::Debug for CollectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionManager")
            .field("title", &self.settings.title)
            .field("items", &self.model.names())
            .field("current", &self.current)
            .field("registry", &self.registry)
            .finish()
    }
}
