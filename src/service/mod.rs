pub mod geometry;
pub mod linker;
pub mod normalize;
pub mod ranker;
pub mod strategies;
pub mod walker;

pub use linker::{link_verification, LinkRequest, VerificationLinker};
pub use strategies::FieldKind;
pub use walker::{FieldWalker, Linkable};
