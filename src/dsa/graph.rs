use std::fmt::{self, Display};

type HashMap<K,V> = std::collections::hash_map::HashMap<K,V,nohash::BuildNoHashHasher<usize>>;
type NameMap = std::collections::HashMap<String,usize>;

// weight is relative to the origin's largest outgoing flow,
// 0 means no route, 1 means dominant route
#[derive(Clone,Debug,PartialEq)]
pub struct Edge {
    pub from:String,
    pub to:String,
    pub weight:f64,
}

impl Edge {
    pub fn new(from:impl Into<String>,to:impl Into<String>,weight:f64) -> Self {
        Self {from:from.into(),to:to.into(),weight}
    }
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

// "->", ";" and "*" are the delimiters of this format,
// which is why vertex names may not contain them
impl Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weight <= 0.0 {
            write!(f,"{}!>{};",self.from,self.to)
        }else if self.weight >= 1.0 {
            write!(f,"{}->{};",self.from,self.to)
        }else{
            write!(f,"{}->{}*{:.3};",self.from,self.to,self.weight)
        }
    }
}

// edges stay in production order, parallel edges are not merged
#[derive(Clone,Debug,Default,PartialEq)]
pub struct RoutingGraph {
    edges:Vec<Edge>,
    // origin name -> origin position, in order of first appearance
    origins:NameMap,
    // origin position -> indices into edges
    outgoing:HashMap<usize,Vec<usize>>,
}

impl RoutingGraph {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_capacity(capacity:usize) -> Self {
        if capacity == 0 {
            return Self::new();
        }
        Self {
            edges:Vec::with_capacity(capacity),
            origins:NameMap::with_capacity(capacity),
            outgoing:HashMap::with_capacity_and_hasher(capacity,nohash::BuildNoHashHasher::default()),
        }
    }
    pub fn push_edge(&mut self,edge:Edge) {
        let next_origin = self.origins.len();
        let origin = *self.origins.entry(edge.from.clone()).or_insert(next_origin);
        self.outgoing.entry(origin).or_default().push(self.edges.len());
        self.edges.push(edge);
    }
    pub fn len(&self) -> usize {
        self.edges.len()
    }
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
    pub fn iter(&self) -> std::slice::Iter<'_,Edge> {
        self.edges.iter()
    }
    pub fn outgoing<'a>(&'a self,from:&str) -> impl Iterator<Item = &'a Edge> + use<'a> {
        self.origins.get(from)
            .and_then(|origin| self.outgoing.get(origin))
            .into_iter()
            .flatten()
            .map(move |index| &self.edges[*index])
    }
    // first matching edge wins
    pub fn weight(&self,from:&str,to:&str) -> Option<f64> {
        self.outgoing(from).find(|edge| edge.to == to).map(|edge| edge.weight)
    }
    pub fn shrink_to_fit(&mut self) {
        self.edges.shrink_to_fit();
        self.origins.shrink_to_fit();
        self.outgoing.shrink_to_fit();
        for indices in self.outgoing.values_mut() {
            indices.shrink_to_fit();
        }
    }
}

impl Display for RoutingGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for edge in self.edges.iter() {
            write!(f,"{edge}")?;
        }
        Ok(())
    }
}

impl FromIterator<Edge> for RoutingGraph {
    fn from_iter<T: IntoIterator<Item = Edge>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let size = match iter.size_hint() {
            (_,Some(higher)) => {higher},
            (lower,None) => {lower}
        };
        let mut graph = Self::with_capacity(size);
        for edge in iter {
            graph.push_edge(edge);
        }
        graph.shrink_to_fit();
        graph
    }
}

impl IntoIterator for RoutingGraph {
    type Item = Edge;
    type IntoIter = std::vec::IntoIter<Edge>;
    fn into_iter(self) -> Self::IntoIter {
        self.edges.into_iter()
    }
}

impl<'a> IntoIterator for &'a RoutingGraph {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a,Edge>;
    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
