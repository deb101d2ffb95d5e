pub mod extract;
pub mod grammar;
pub mod scrape;
