pub mod dc_director;
pub mod dsa;

pub use dc_director::{
    BalanceError, DcDirector, DirectorConfig, GreedyDirector, RouteError, ValidationError,
    Vertex,
};
pub use dsa::graph::{Edge, RoutingGraph};
