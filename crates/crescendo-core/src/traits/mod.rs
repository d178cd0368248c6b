//! Collaborator traits.
//!
//! Every seam the engine does not own (persistence, the release index, the
//! outbound transports) is a trait object, so production backends and test
//! fakes are interchangeable.

pub mod release_source;
pub mod repository;
pub mod transport;

pub use release_source::ReleaseSource;
pub use repository::{
    ChannelBindingRepository, FollowRepository, NotificationConfigRepository, UserRepository,
};
pub use transport::{ChatTransport, MailTransport};
