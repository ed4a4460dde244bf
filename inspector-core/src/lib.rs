pub mod binding;
pub mod control;
pub mod decode;
pub mod error;
pub mod item;
pub mod manager;
pub mod model;
pub mod panel;
pub mod registry;
pub mod settings;

pub use binding::{build, BindingHost, BoundControl};
pub use control::{Control, ControlEdit};
pub use decode::{DecodeError, ImageDecoder, NoImageDecoder};
pub use error::{ConstructionError, ManagerError};
pub use item::{Item, RestoreIssue, NAME_PARAMETER};
pub use manager::{CollectionManager, LoadReport, Outcome, SkippedRecord};
pub use model::{DropAction, ItemListModel, ModelChange};
pub use panel::{PanelNode, PropertyPanel};
pub use registry::{CreationArgs, ItemConstructor, ItemRegistry, NameGenerator};
pub use settings::{ManagerSettings, SettingsError};
