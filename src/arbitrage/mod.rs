pub mod conversion_table;
pub mod detector;
pub mod enumerator;
pub mod evaluator;
pub mod p2p_index;
pub mod ranker;
pub mod snapshot;
