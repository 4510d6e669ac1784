pub mod apartment;
