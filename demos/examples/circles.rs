// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Colored circles of mixed diameters; a new random circle is appended each round.
//!
//! Every append changes the element count, so the collection starts a new
//! generation and measures everything again before wrapping.
//!
//! Run:
//! - `cargo run -p understory_flow_demos --example circles`

use kurbo::Size;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use understory_flow::{FlowCollection, FlowConfig};
use understory_flow_demos::{Host, sketch};

#[derive(Clone, Copy, Debug)]
struct Circle {
    rgb: [u8; 3],
    diameter: f64,
}

const PALETTE: [Circle; 6] = [
    Circle {
        rgb: [149, 181, 148],
        diameter: 70.0,
    },
    Circle {
        rgb: [231, 189, 209],
        diameter: 60.0,
    },
    Circle {
        rgb: [252, 222, 215],
        diameter: 30.0,
    },
    Circle {
        rgb: [240, 190, 166],
        diameter: 15.0,
    },
    Circle {
        rgb: [136, 186, 205],
        diameter: 45.0,
    },
    Circle {
        rgb: [111, 172, 200],
        diameter: 25.0,
    },
];

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut circles = PALETTE.to_vec();
    let mut rng = StdRng::seed_from_u64(42);
    let mut host = Host::new(4, 42);
    let mut flow = FlowCollection::new(FlowConfig::new(390.0), circles.len());

    for round in 0..4 {
        let mut generate = |index: usize| circles[index];
        let frame = host.settle(&mut flow, &mut generate, |circle: &Circle| {
            Size::new(circle.diameter, circle.diameter)
        });
        println!("round {round}, generation {}:", flow.generation().get());
        print!(
            "{}",
            sketch(&frame, 10.0, |circle| {
                let [r, g, b] = circle.rgb;
                format!("#{r:02x}{g:02x}{b:02x}")
            })
        );

        circles.push(PALETTE[rng.gen_range(0..PALETTE.len())]);
        flow.set_element_count(circles.len());
    }
}
