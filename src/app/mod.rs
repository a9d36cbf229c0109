// Application layer: concrete pipelines wired from core building blocks and adapters.

pub mod pipelines;
pub mod sequence;
