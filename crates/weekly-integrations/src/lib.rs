pub mod asana;
pub mod http;
pub mod quip;
pub mod traits;

pub use asana::AsanaClient;
pub use quip::{QuipClient, QuipThread};
pub use traits::{DocumentSink, PublishedDocument, TaskSource};
