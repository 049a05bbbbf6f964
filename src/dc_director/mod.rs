pub mod greedy;
pub mod trace;
pub mod vertex;

use thiserror::Error;

use crate::dsa::graph::RoutingGraph;

pub use greedy::{BalanceState, DirectorConfig, GreedyDirector, RawEdge, WorkingNode};
pub use trace::{LogTrace, NoopTrace, Phase, TraceSink};
pub use vertex::Vertex;

#[derive(Error,Debug,Clone,PartialEq)]
pub enum ValidationError {
    #[error("vertex name {name:?} should not contain \"->\" or \";\" or \"*\"")]
    InvalidName{name:String},
    #[error("egress of {name:?} is {egress}, less than 0")]
    NegativeOutdegree{name:String,egress:f64},
    #[error("ingress of {name:?} is {ingress}, less than 0")]
    NegativeIndegree{name:String,ingress:f64},
    #[error("egress of {name:?} is {egress}, which is not a finite number")]
    NonFiniteOutdegree{name:String,egress:f64},
    #[error("ingress of {name:?} is {ingress}, which is not a finite number")]
    NonFiniteIndegree{name:String,ingress:f64},
}

#[derive(Error,Debug,Clone,Copy,PartialEq)]
pub enum BalanceError {
    #[error("total egress of all vertexes is 0")]
    ZeroTotalEgress,
    #[error("total ingress of all vertexes is 0")]
    ZeroTotalIngress,
    #[error("total egress of all vertexes is {total}, which is not a finite number")]
    NonFiniteTotalEgress{total:f64},
    #[error("total ingress of all vertexes is {total}, which is not a finite number")]
    NonFiniteTotalIngress{total:f64},
    #[error("egress cannot be rescaled from {egress_sum} to {ingress_sum} as a finite, non-zero factor")]
    UnrepresentableScale{egress_sum:f64,ingress_sum:f64},
}

#[derive(Error,Debug,Clone,PartialEq)]
pub enum RouteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Balance(#[from] BalanceError),
}

pub type Result<T> = std::result::Result<T,RouteError>;

pub trait DcDirector {
    // input order breaks every tie of the greedy pass
    fn route(&self,vertexes:&[Vertex]) -> Result<RoutingGraph>;
}
