// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thirty padded text labels wrapped into a 390-unit column.
//!
//! Run:
//! - `cargo run -p understory_flow_demos --example text_grid`

use kurbo::Size;
use understory_flow::{FlowCollection, FlowConfig};
use understory_flow_demos::{Host, TextMetrics, sketch};

/// Padding on every side of a label.
const LABEL_PADDING: f64 = 16.0;

#[derive(Clone, Debug)]
struct Label {
    text: String,
    inverted: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut generate = |index: usize| Label {
        text: format!("Index: {index}"),
        inverted: index % 2 == 1,
    };
    let measure = |label: &Label| {
        let text = TextMetrics::BODY.measure(&label.text);
        Size::new(
            text.width + 2.0 * LABEL_PADDING,
            text.height + 2.0 * LABEL_PADDING,
        )
    };

    let mut flow = FlowCollection::new(FlowConfig::new(390.0), 30);
    let mut host = Host::new(8, 30);
    let frame = host.settle(&mut flow, &mut generate, measure);

    print!(
        "{}",
        sketch(&frame, TextMetrics::BODY.char_width, |label| {
            if label.inverted {
                label.text.to_uppercase()
            } else {
                label.text.clone()
            }
        })
    );
}
