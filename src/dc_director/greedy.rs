use std::collections::HashMap;
use std::fmt;

use log::{debug, warn};

use super::trace::{LogTrace, NoopTrace, Phase, TraceSink};
use super::{BalanceError, DcDirector, Result, Vertex};
use crate::dsa::graph::{Edge, RoutingGraph};

#[derive(Clone,Copy,Debug,Default,PartialEq,Eq)]
pub struct DirectorConfig {
    pub simplify:bool,
    pub verbose:bool,
}

#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum BalanceState {
    Balanced,
    Convex,
    Concave,
}

impl fmt::Display for BalanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceState::Balanced => write!(f, "BALANCED"),
            BalanceState::Convex => write!(f, "CONVEX"),
            BalanceState::Concave => write!(f, "CONCAVE"),
        }
    }
}

// flow leaving a node, by position in the request
#[derive(Clone,Copy,Debug,PartialEq)]
pub struct RawEdge {
    pub from:usize,
    pub to:usize,
    pub weight:f64,
}

impl RawEdge {
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Clone,Debug)]
pub struct WorkingNode {
    position:usize,
    name:String,
    egress:f64,
    ingress:f64,
    diff:f64,
    edges:Vec<RawEdge>,
}

impl WorkingNode {
    fn new(position:usize,vertex:&Vertex) -> Self {
        Self {
            position,
            name:vertex.name.clone(),
            egress:vertex.egress,
            ingress:vertex.ingress,
            diff:0.0,
            edges:vec![],
        }
    }
    pub fn position(&self) -> usize {
        self.position
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn egress(&self) -> f64 {
        self.egress
    }
    pub fn ingress(&self) -> f64 {
        self.ingress
    }
    pub fn diff(&self) -> f64 {
        self.diff
    }
    pub fn edges(&self) -> &[RawEdge] {
        &self.edges
    }
    pub fn state(&self) -> BalanceState {
        if self.diff > 0.0 {
            BalanceState::Convex
        }else if self.diff < 0.0 {
            BalanceState::Concave
        }else{
            BalanceState::Balanced
        }
    }
    fn push_edge(&mut self,to:usize,weight:f64) {
        self.edges.push(RawEdge {from:self.position,to,weight});
    }
}

impl fmt::Display for WorkingNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let get_fmt = |num: f64| if num >= 0.0f64 { format!("{:+4.2}", num) } else { format!("{:4.2}", num) };
        write!(f, "VERTEX[{:02}] {} egress={:4.2} ingress={:4.2} diff={} {}",
               self.position, self.name, self.egress, self.ingress, get_fmt(self.diff), self.state())
    }
}

pub struct GreedyDirector {
    config:DirectorConfig,
    trace:Box<dyn TraceSink>,
}

impl GreedyDirector {
    pub fn new(simplify:bool,verbose:bool) -> Self {
        Self::from_config(DirectorConfig {simplify,verbose})
    }
    pub fn from_config(config:DirectorConfig) -> Self {
        let trace:Box<dyn TraceSink> = if config.verbose {
            Box::new(LogTrace)
        }else{
            Box::new(NoopTrace)
        };
        Self {config,trace}
    }
    pub fn with_trace<T:TraceSink + 'static>(mut self,trace:T) -> Self {
        self.trace = Box::new(trace);
        self
    }
    pub fn config(&self) -> DirectorConfig {
        self.config
    }

    // validates and copies, stops at the first invalid vertex
    fn working_set(vertexes:&[Vertex]) -> Result<Vec<WorkingNode>> {
        let mut positions:HashMap<&str,usize> = HashMap::with_capacity(vertexes.len());
        let mut nodes = Vec::with_capacity(vertexes.len());
        for (position,vertex) in vertexes.iter().enumerate() {
            vertex.validate()?;
            if let Some(first) = positions.insert(&vertex.name,position) {
                warn!("vertex {:?} at {} duplicates the one at {}, graph names will be ambiguous",
                      vertex.name, position, first);
            }
            nodes.push(WorkingNode::new(position,vertex));
        }
        Ok(nodes)
    }

    // returns the factor applied to every egress
    fn normalize(nodes:&mut [WorkingNode]) -> Result<f64> {
        let egress_sum:f64 = nodes.iter().map(|node| node.egress).sum();
        let ingress_sum:f64 = nodes.iter().map(|node| node.ingress).sum();
        if egress_sum == 0.0 {
            return Err(BalanceError::ZeroTotalEgress.into());
        }
        if ingress_sum == 0.0 {
            return Err(BalanceError::ZeroTotalIngress.into());
        }
        // every degree is finite, their sums may still overflow
        if !egress_sum.is_finite() {
            return Err(BalanceError::NonFiniteTotalEgress{total:egress_sum}.into());
        }
        if !ingress_sum.is_finite() {
            return Err(BalanceError::NonFiniteTotalIngress{total:ingress_sum}.into());
        }
        let factor = ingress_sum / egress_sum;
        if !factor.is_finite() || factor == 0.0 {
            return Err(BalanceError::UnrepresentableScale{egress_sum,ingress_sum}.into());
        }
        for node in nodes.iter_mut() {
            node.egress *= factor;
            node.diff = node.egress - node.ingress;
        }
        Ok(factor)
    }

    fn self_fill(&self,nodes:&mut [WorkingNode]) {
        for node in nodes.iter_mut() {
            if self.config.simplify && (node.ingress == 0.0 || node.egress == 0.0) {
                continue;
            }
            // serve locally whatever matches on both sides
            let weight = if node.diff > 0.0 {node.ingress} else {node.egress};
            node.push_edge(node.position,weight);
        }
    }

    // Convex nodes overflow into concave nodes, both in input order.
    // Every step exhausts the head of at least one list.
    fn overflow(nodes:&mut [WorkingNode]) {
        let convex:Vec<usize> = nodes.iter()
            .filter(|node| node.diff > 0.0)
            .map(|node| node.position)
            .collect();
        let concave:Vec<usize> = nodes.iter()
            .filter(|node| node.diff < 0.0)
            .map(|node| node.position)
            .collect();

        let (mut i,mut j) = (0,0);
        while let (Some(&from),Some(&to)) = (convex.get(i),concave.get(j)) {
            let surplus = nodes[from].diff;
            let deficit = nodes[to].diff;
            debug_assert!(surplus > 0.0 && deficit < 0.0);

            if surplus + deficit < 0.0 {
                nodes[from].push_edge(to,surplus);
                nodes[to].diff += surplus;
                nodes[from].diff = 0.0;
                i += 1;
            }else{
                nodes[from].push_edge(to,-deficit);
                nodes[from].diff += deficit;
                nodes[to].diff = 0.0;
                j += 1;
                if nodes[from].diff <= 0.0 {
                    i += 1;
                }
            }
        }

        let residue:f64 = nodes.iter().map(|node| node.diff.abs()).sum();
        if residue > 0.0 {
            debug!("{:e} of diff left unresolved after overflow", residue);
        }
    }

    fn align(nodes:&mut [WorkingNode]) {
        for node in nodes.iter_mut() {
            let max_weight = node.edges.iter().map(|edge| edge.weight).fold(0.0,f64::max);
            if max_weight == 0.0 {
                for edge in node.edges.iter_mut() {
                    edge.weight = 0.0;
                }
            }else{
                for edge in node.edges.iter_mut() {
                    edge.weight /= max_weight;
                }
            }
        }
    }

    fn collect(&self,nodes:&[WorkingNode]) -> RoutingGraph {
        let mut graph = RoutingGraph::with_capacity(nodes.iter().map(|node| node.edges.len()).sum());
        for node in nodes {
            for edge in node.edges.iter() {
                // routing entirely to itself is the same as not routing
                if self.config.simplify && edge.is_self_loop() && edge.weight >= 1.0 {
                    continue;
                }
                graph.push_edge(Edge::new(node.name.as_str(),nodes[edge.to].name.as_str(),edge.weight));
            }
        }
        graph
    }
}

impl Default for GreedyDirector {
    fn default() -> Self {
        Self::from_config(DirectorConfig::default())
    }
}

impl fmt::Debug for GreedyDirector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreedyDirector").field("config",&self.config).finish_non_exhaustive()
    }
}

impl DcDirector for GreedyDirector {
    fn route(&self,vertexes:&[Vertex]) -> Result<RoutingGraph> {
        let mut nodes = Self::working_set(vertexes)?;

        let factor = Self::normalize(&mut nodes)?;
        debug!("rescaled egress of {} vertexes by {}", nodes.len(), factor);
        self.trace.trace(Phase::Normalized,&nodes);

        self.self_fill(&mut nodes);
        Self::overflow(&mut nodes);
        self.trace.trace(Phase::Allocated,&nodes);

        Self::align(&mut nodes);
        self.trace.trace(Phase::Aligned,&nodes);

        Ok(self.collect(&nodes))
    }
}
