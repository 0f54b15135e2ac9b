use rand::rngs::SmallRng;
use rand::SeedableRng;
use smoke_wasm::config::RevealConfig;
use smoke_wasm::reveal::{RevealNode, RevealScheduler, TransitionKind};

fn plan(nodes: &[RevealNode]) -> Vec<smoke_wasm::reveal::NodePlan> {
    RevealScheduler::new(RevealConfig::default()).plan(nodes, &mut SmallRng::seed_from_u64(17))
}

#[test]
fn last_node_letters_only_fade_in() {
    let plans = plan(&[RevealNode::new("stay put", true)]);
    assert_eq!(plans[0].letters.len(), "stay put".chars().count());
    for letter in &plans[0].letters {
        let t = letter.transitions();
        assert_eq!(t.len(), 1);
        assert_eq!(t[0].kind, TransitionKind::FadeIn);
    }
}

#[test]
fn other_nodes_fade_in_then_out() {
    let plans = plan(&[RevealNode::new("drift", false)]);
    for letter in &plans[0].letters {
        let t = letter.transitions();
        assert_eq!(t.len(), 2);
        assert_eq!(t[0].kind, TransitionKind::FadeIn);
        assert_eq!(t[1].kind, TransitionKind::FadeOut);
        assert!(t[1].delay_ms >= t[0].delay_ms);
    }
}

#[test]
fn fade_in_delays_stay_inside_each_nodes_window() {
    let config = RevealConfig::default();
    let nodes = [
        RevealNode::new("first", false),
        RevealNode::new("second", false),
        RevealNode::new("third", true),
    ];
    let plans = plan(&nodes);
    for (i, node) in plans.iter().enumerate() {
        let start = config.window_start_ms + i as f64 * config.window_step_ms;
        assert_eq!(node.window_start_ms, start);
        for letter in &node.letters {
            assert!(letter.fade_in_ms >= start);
            assert!(letter.fade_in_ms < start + config.window_span_ms);
        }
    }
    // successive nodes start after the previous window closed
    let first_end = plans[0].letters.iter().map(|l| l.fade_in_ms).fold(0.0, f64::max);
    let second_start = plans[1].letters.iter().map(|l| l.fade_in_ms).fold(f64::MAX, f64::min);
    assert!(second_start > first_end);
}
