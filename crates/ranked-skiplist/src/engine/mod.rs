mod list_inner;
mod node;
mod state;


pub(crate) use self::{list_inner::SpanSkiplist, node::NodeId, state::ListState};
