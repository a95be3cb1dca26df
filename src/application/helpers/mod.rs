pub mod event_parsing;
