use super::ValidationError;

// delimiters of the rendered routing graph
const RESERVED:[&str;3] = ["->",";","*"];

#[derive(Clone,Debug,Default,PartialEq)]
pub struct Vertex {
    // should be unique within a request
    pub name:String,
    // outbound demand, e.g. clients deployed here
    pub egress:f64,
    // inbound capacity, e.g. servers deployed here
    pub ingress:f64,
    // data centers close to this one, not used for routing yet
    pub neighbors:Vec<String>,
}

impl Vertex {
    pub fn new(name:impl Into<String>,egress:f64,ingress:f64) -> Self {
        Self {name:name.into(),egress,ingress,neighbors:vec![]}
    }
    pub fn with_neighbors<I,S>(mut self,neighbors:I) -> Self
        where I:IntoIterator<Item = S>, S:Into<String>
    {
        self.neighbors = neighbors.into_iter().map(Into::into).collect();
        self
    }
    pub fn validate(&self) -> Result<(),ValidationError> {
        if RESERVED.iter().any(|delimiter| self.name.contains(delimiter)) {
            return Err(ValidationError::InvalidName{name:self.name.clone()});
        }
        if self.egress < 0.0 {
            return Err(ValidationError::NegativeOutdegree{name:self.name.clone(),egress:self.egress});
        }
        if !self.egress.is_finite() {
            return Err(ValidationError::NonFiniteOutdegree{name:self.name.clone(),egress:self.egress});
        }
        if self.ingress < 0.0 {
            return Err(ValidationError::NegativeIndegree{name:self.name.clone(),ingress:self.ingress});
        }
        if !self.ingress.is_finite() {
            return Err(ValidationError::NonFiniteIndegree{name:self.name.clone(),ingress:self.ingress});
        }
        Ok(())
    }
}
