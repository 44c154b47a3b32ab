//! Entity model for entitykit.
//!
//! Defines the types an entity type declares itself with, and the contract
//! between an entity type and the host that stores it:
//! - [`FieldSpec`] / [`FieldDefinitions`]: typed fields with storage settings,
//!   defaults and form/view display hints
//! - [`EntityTypeDescriptor`]: the entity type's id, table, keys, labels,
//!   handler names and link templates
//! - [`EntityBase`], [`PersistableEntity`], [`Owned`], [`ContentEntity`]:
//!   composable capabilities instead of a base class
//! - [`EntityValidator`]: the field validation layer run before every save
//!
//! Nothing here performs I/O. Storage lives in `entitykit-storage`.

mod descriptor;
mod display;
mod entity;
mod error;
mod field;
mod validation;
mod values;

pub use descriptor::{EntityKeys, EntityLabels, EntityTypeDescriptor, Handlers, LinkTemplates, PluralLabel};
pub use display::{DisplayContext, DisplayOptions, FieldDisplay, LabelDisplay};
pub use entity::{ContentEntity, EntityBase, Owned, PersistableEntity, SaveContext};
pub use error::{EntityError, EntityResult};
pub use field::{DefaultContext, DefaultValue, FieldDefinitions, FieldSettings, FieldSpec, FieldType};
pub use validation::{ConstraintValidator, EntityValidator, Violation};
pub use values::{FieldValues, FormattedText};
