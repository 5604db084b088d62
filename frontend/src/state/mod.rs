pub mod columns;
pub mod drafts;
pub mod filters;
pub mod form;
pub mod optimistic;
pub mod save_tracker;
