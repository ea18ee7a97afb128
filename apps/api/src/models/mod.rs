pub mod candidate;
pub mod evidence;
pub mod record;
