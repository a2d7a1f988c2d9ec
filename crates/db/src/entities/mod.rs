//! Database entities.

pub mod admin_session;
pub mod draft;
pub mod email_log;
pub mod event;
pub mod fest;
pub mod gallery_item;
pub mod winner;

pub use admin_session::Entity as AdminSession;
pub use draft::Entity as Draft;
pub use email_log::Entity as EmailLog;
pub use event::Entity as Event;
pub use fest::Entity as Fest;
pub use gallery_item::Entity as GalleryItem;
pub use winner::Entity as Winner;
