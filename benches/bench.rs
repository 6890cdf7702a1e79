// Criterion benchmarks for the vc-match scoring core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vc_match::core::{location_score, overlap_score, Matcher};
use vc_match::models::{Location, Opportunity, OpportunityStatus, VolunteerProfile};

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn create_volunteer() -> VolunteerProfile {
    VolunteerProfile {
        volunteer_id: "vol_1".to_string(),
        name: "Bench Volunteer".to_string(),
        skills: tags(&["teaching", "first-aid", "event-planning", "fundraising"]),
        interests: tags(&["education", "environment", "health"]),
        location: Some(Location {
            city: "KL".to_string(),
            state: "Selangor".to_string(),
        }),
    }
}

fn create_opportunity(id: usize) -> Opportunity {
    let skill_pool = ["teaching", "first-aid", "fundraising", "logistics", "scuba"];
    let interest_pool = ["education", "environment", "health", "marine"];

    Opportunity {
        opportunity_id: format!("opp_{}", id),
        organization_id: format!("org_{}", id % 20),
        title: format!("Opportunity {}", id),
        required_skills: tags(&skill_pool[..(id % skill_pool.len()) + 1]),
        preferred_interests: tags(&interest_pool[..(id % interest_pool.len()) + 1]),
        location: Some(Location {
            city: if id % 3 == 0 { "KL" } else { "Ipoh" }.to_string(),
            state: if id % 7 == 0 { "Perak" } else { "Selangor" }.to_string(),
        }),
        status: OpportunityStatus::Open,
        created_at: None,
    }
}

fn bench_overlap_score(c: &mut Criterion) {
    let offered = tags(&["teaching", "first-aid", "event-planning", "fundraising"]);
    let wanted = tags(&["teaching", "fundraising", "logistics"]);

    c.bench_function("overlap_score", |b| {
        b.iter(|| overlap_score(black_box(&offered), black_box(&wanted)));
    });
}

fn bench_location_score(c: &mut Criterion) {
    let volunteer = Location {
        city: "KL".to_string(),
        state: "Selangor".to_string(),
    };
    let opportunity = Location {
        city: "Shah Alam".to_string(),
        state: "Selangor".to_string(),
    };

    c.bench_function("location_score", |b| {
        b.iter(|| location_score(black_box(Some(&volunteer)), black_box(Some(&opportunity))));
    });
}

fn bench_compute_matches(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let volunteer = create_volunteer();

    let mut group = c.benchmark_group("matching");

    for candidate_count in [10usize, 50, 100, 500, 1000].iter() {
        let candidates: Vec<Opportunity> =
            (0..*candidate_count).map(create_opportunity).collect();

        group.bench_with_input(
            BenchmarkId::new("compute_matches", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    matcher.compute_matches(
                        black_box(&volunteer),
                        black_box(candidates.clone()),
                        black_box(&[]),
                        black_box(20),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_overlap_score,
    bench_location_score,
    bench_compute_matches
);

criterion_main!(benches);
