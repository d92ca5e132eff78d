// Domain layer: quote inputs and the price breakdown. No dependencies beyond std/serde.

pub mod model;
