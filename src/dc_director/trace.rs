use std::fmt;

use log::info;

use super::greedy::WorkingNode;

#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum Phase {
    // egress rescaled, diffs computed
    Normalized,
    // self-loops and overflow edges carry absolute flow
    Allocated,
    // weights divided by each origin's largest flow
    Aligned,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Normalized => write!(f, "NORMALIZED"),
            Phase::Allocated => write!(f, "ALLOCATED"),
            Phase::Aligned => write!(f, "ALIGNED"),
        }
    }
}

pub trait TraceSink: Send + Sync {
    fn trace(&self,phase:Phase,nodes:&[WorkingNode]);
}

#[derive(Clone,Copy,Debug,Default)]
pub struct NoopTrace;

impl TraceSink for NoopTrace {
    fn trace(&self,_phase:Phase,_nodes:&[WorkingNode]) {}
}

#[derive(Clone,Copy,Debug,Default)]
pub struct LogTrace;

impl TraceSink for LogTrace {
    fn trace(&self,phase:Phase,nodes:&[WorkingNode]) {
        info!("===== {} ({} vertexes) =====", phase, nodes.len());
        for node in nodes {
            info!("{}", node);
            for edge in node.edges() {
                info!("  {} -> {} {:.06}", node.name(), nodes[edge.to].name(), edge.weight);
            }
        }
    }
}
