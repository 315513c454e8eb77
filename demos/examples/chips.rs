// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Removable tag chips.
//!
//! Removing a chip shrinks the collection and adding one grows it; either
//! starts a new generation. Renaming a chip keeps the count, so the host invalidates measurements
//! explicitly. Content is memoized per generation so each chip is built once
//! for its probe and reused for its placement.
//!
//! Run:
//! - `cargo run -p understory_flow_demos --example chips`

use kurbo::Size;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use understory_flow::{FlowCollection, FlowConfig, Memoized};
use understory_flow_demos::{Host, TextMetrics, sketch};

const NAMES: [&str; 15] = [
    "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen",
];

/// Width of the leading remove icon of an editable chip.
const ICON_WIDTH: f64 = 17.0;

#[derive(Clone, Debug)]
struct Chip {
    name: String,
    editable: bool,
}

impl Chip {
    fn size(&self) -> Size {
        let text = TextMetrics::FOOTNOTE.measure(&self.name);
        let leading = if self.editable { ICON_WIDTH + 5.0 } else { 4.0 };
        // Six units of padding around the text, four more after it.
        Size::new(leading + text.width + 12.0 + 4.0, text.height + 12.0)
    }
}

fn show(flow: &mut FlowCollection, host: &mut Host, chips: &[String], heading: &str) {
    let mut generate = Memoized::new(|index: usize| Chip {
        name: chips[index].clone(),
        editable: true,
    });
    let frame = host.settle(flow, &mut generate, Chip::size);
    println!("{heading} (generation {}):", flow.generation().get());
    print!("{}", sketch(&frame, 6.5, |chip| format!("x {}", chip.name)));
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut chips: Vec<String> = NAMES.iter().map(|name| (*name).to_owned()).collect();
    let mut flow = FlowCollection::new(FlowConfig::new(390.0), chips.len());
    let mut host = Host::new(5, 15);

    show(&mut flow, &mut host, &chips, "all chips");

    for name in ["Three", "Eight", "Twelve"] {
        chips.retain(|chip| chip != name);
        flow.set_element_count(chips.len());
        show(&mut flow, &mut host, &chips, &format!("removed {name}"));
    }

    let mut rng = StdRng::seed_from_u64(7);
    if let Some(name) = NAMES.choose(&mut rng) {
        chips.push((*name).to_owned());
        flow.set_element_count(chips.len());
        show(&mut flow, &mut host, &chips, &format!("added {name}"));
    }

    chips[0] = "Uno".to_owned();
    flow.invalidate_measurements();
    show(&mut flow, &mut host, &chips, "renamed One");
}
