use juggler_core::insights::{critical_few, group_by_dna, high_effort_tasks};
use serde_json::json;

use super::{dna_badge, print_json, short_id, tier_badge, CliResult, Session};

pub fn run(json: bool) -> CliResult {
    let session = Session::open()?;
    let store = &session.store;
    let dash = &session.config.dashboard;

    let load = store.load();
    let top = critical_few(store.tasks(), dash.critical_few);
    let heavy = high_effort_tasks(store.tasks(), dash.high_effort_threshold);
    let history: Vec<_> = store.history().samples().collect();

    if json {
        print_json(&json!({
            "available_energy": store.available_energy(),
            "load": {
                "total_effort": load.total_effort,
                "tier": load.tier,
                "label": load.tier.label(),
                "meter_percentage": load.meter_percentage(),
            },
            "critical_few": top,
            "high_effort": heavy,
            "suggestion": store.suggestion(),
            "focus": store.focus().active(),
            "history": history,
        }))?;
        return session.save();
    }

    println!("Energy available: {:.1}/10", store.available_energy());
    println!(
        "Cognitive load:   {} {} ({}), meter {:.0}%",
        load.total_effort,
        tier_badge(load.tier),
        load.tier.label(),
        load.meter_percentage()
    );
    println!("  {}", load.tier.interpretation());

    println!();
    println!("Critical few:");
    if top.is_empty() {
        println!("  nothing scheduled");
    }
    for (i, t) in top.iter().enumerate() {
        println!("  {}. {:.2}  {}  ({})", i + 1, t.flow_rating(), t.description, short_id(t.id.as_str()));
    }

    if !heavy.is_empty() {
        println!();
        println!("High-effort tasks (effort >= {}):", dash.high_effort_threshold);
        for t in &heavy {
            println!("  e{:<2} {}", t.effort_score, t.description);
        }
    }

    let groups = group_by_dna(store.tasks(), store.projects());
    if !groups.is_empty() {
        println!();
        println!("By working style:");
        for (dna, tasks) in groups {
            let effort: u32 = tasks.iter().map(|t| t.effort_score).sum();
            println!("  {:<22} {} task(s), effort {}", dna_badge(dna), tasks.len(), effort);
        }
    }

    if let Some(s) = store.pending_suggestion() {
        println!();
        println!(
            "Suggestion: pause '{}' to free {} effort points (juggler suggestion accept | dismiss)",
            s.project.name, s.effort_reduction
        );
    } else if store.suggestion().is_suppressed() {
        println!();
        println!("Pause suggestions are snoozed for today.");
    }

    if let Some(active) = store.focus().active() {
        let elapsed = store.now() - active.started_at;
        println!();
        println!(
            "Focusing on {} for {}m",
            short_id(active.task_id.as_str()),
            elapsed.num_minutes().max(0)
        );
    }

    if history.len() > 1 {
        println!();
        println!("Load history:");
        for sample in &history {
            println!("  {}  {:>3}  {}", sample.date, sample.total_effort, tier_badge(sample.tier()));
        }
    }

    session.save()
}
