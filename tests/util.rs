//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use lattice_domain::element::{Element, RenderSink};

/// Shapeless stand-in element: a fluid flag and labels, no containment math.
#[derive(Debug)]
pub struct Probe {
    pub fluid: bool,
    pub labels: Vec<i32>,
}

impl Probe {
    pub fn solid(labels: &[i32]) -> Arc<dyn Element> {
        Arc::new(Probe {
            fluid: false,
            labels: labels.to_vec(),
        })
    }

    pub fn fluid(labels: &[i32]) -> Arc<dyn Element> {
        Arc::new(Probe {
            fluid: true,
            labels: labels.to_vec(),
        })
    }
}

impl Element for Probe {
    fn is_fluid(&self) -> bool {
        self.fluid
    }

    fn labels(&self) -> &[i32] {
        &self.labels
    }

    fn render(&self, sink: &mut dyn RenderSink) {
        sink.region(&[], self.fluid);
        for &label in &self.labels {
            sink.label([0.0, 0.0, 0.0], label);
        }
    }

    fn describe(&self) -> String {
        format!("probe(fluid={}, labels={:?})", self.fluid, self.labels)
    }
}

/// Renderer stub that counts what elements hand it.
#[derive(Debug, Default)]
pub struct CountingSink {
    pub regions: usize,
    pub labels: Vec<i32>,
}

impl RenderSink for CountingSink {
    fn region(&mut self, _outline: &[[f64; 3]], _fluid: bool) {
        self.regions += 1;
    }

    fn label(&mut self, _position: [f64; 3], label: i32) {
        self.labels.push(label);
    }
}
