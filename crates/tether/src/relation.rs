//! Typed accessors for one named relation of a model instance.
//!
//! Each accessor binds a base model value to a relation declared on it.
//! Every call resolves the declaration again through the database schema,
//! copies key values between the base and related values, and then reads or
//! writes through the persistence helpers.

mod belongs_to;
pub use belongs_to::BelongsTo;

mod descriptor;
pub use descriptor::Descriptor;

mod has_many;
pub use has_many::HasMany;

mod has_many_through;
pub use has_many_through::HasManyThrough;

mod has_one;
pub use has_one::HasOne;

mod sync;
pub use sync::{project_to_base, project_to_related};
