pub mod harness;

mod concurrency;
mod custody_chain;
mod exam_day;
