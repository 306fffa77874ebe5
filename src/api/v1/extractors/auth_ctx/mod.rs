/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - hand the verified token (AuthCtx) to handlers
 * - axum-specific parts live in core, the type itself in types
 *
 * Public API:
 * - AuthCtx
 * - MaybeAuthCtx
 */

mod core;
mod types;

pub use core::MaybeAuthCtx;
pub use types::AuthCtx;
