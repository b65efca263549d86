pub mod waitlist;

pub use waitlist::waitlist_join;
