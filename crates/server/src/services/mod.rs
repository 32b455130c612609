//! Services wrapping the two external concerns handlers depend on besides
//! the document store.
//!
//! # Services
//!
//! - `token` - Access token issue and verification (HS256 JWT)
//! - `payments` - Stripe payment intents

pub mod payments;
pub mod token;

pub use payments::{PaymentError, PaymentIntent, StripeClient};
pub use token::{Claims, TOKEN_TTL_SECS, TokenError, TokenService};
