mod arena;
mod augment;
mod handle;
mod iter;
mod node;
mod order_statistic;
mod red_black;
mod size;

pub(crate) use handle::Handle;
pub(crate) use iter::RawIter;
pub(crate) use red_black::RawTree;
