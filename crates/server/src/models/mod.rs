//! Record types for the document store and HTTP bodies.
//!
//! Stored documents are loosely shaped, so every non-key field is optional
//! and unknown fields are ignored on read. Fields absent from a record are
//! never written, which keeps `$set` updates partial.

pub mod order;
pub mod part;
pub mod payment;
pub mod profile;
pub mod review;

pub use order::{NewOrder, Order, StatusUpdate};
pub use part::{NewPart, Part, QuantityUpdate};
pub use payment::{NewPayment, PaymentConfirmation, PaymentIntentRequest};
pub use profile::{LoginRequest, Profile, ProfileUpdate};
pub use review::{NewReview, Review};
