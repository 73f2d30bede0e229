//! Inference throughput benchmark.

use amperio_model::Network;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

/// Build a snapshot LSTM model JSON with the given hidden size and
/// pseudo-random weights.
fn synthetic_lstm(hidden: usize) -> String {
    let mut seed = 0x2545_F491u32;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        (seed as f32 / u32::MAX as f32) * 0.2 - 0.1
    };
    let cols = 4 * hidden;
    let row = |next: &mut dyn FnMut() -> f32, n: usize| {
        let vals: Vec<String> = (0..n).map(|_| format!("{:.6}", next())).collect();
        format!("[{}]", vals.join(","))
    };

    let w = row(&mut next, cols);
    let u: Vec<String> = (0..hidden).map(|_| row(&mut next, cols)).collect();
    let b = row(&mut next, cols);
    let dw: Vec<String> = (0..hidden).map(|_| format!("[{:.6}]", next())).collect();

    format!(
        r#"{{
            "in_shape": [null, 1, 1],
            "in_skip": 1,
            "layers": [
                {{ "type": "lstm", "shape": [null, 1, {hidden}],
                   "weights": [[{w}], [{}], {b}] }},
                {{ "type": "dense", "shape": [null, 1, 1], "activation": "",
                   "weights": [[{}], [0.0]] }}
            ]
        }}"#,
        u.join(","),
        dw.join(","),
    )
}

fn bench_forward(c: &mut Criterion) {
    for hidden in [12usize, 16, 24] {
        let json = synthetic_lstm(hidden);
        let mut net = Network::from_slice(json.as_bytes()).unwrap();
        net.warm_up();

        c.bench_function(&format!("lstm_{hidden}_forward_1k"), |b| {
            b.iter(|| {
                let mut acc = 0.0f32;
                for i in 0..1000 {
                    let x = (i as f32 * 0.001).sin() * 0.5;
                    acc += net.forward(black_box(&[x]));
                }
                acc
            });
        });
    }
}

criterion_group!(benches, bench_forward);
criterion_main!(benches);
