//! Seed command: posts a small demo dataset against a running API instance.
//! Talks plain HTTP so it exercises the same surface as any other client;
//! the target is `APP_SEED_BASE_URL` plus the configured base path.

use anyhow::{bail, Context};
use configuration::Settings;
use serde_json::{json, Value};

pub async fn run(settings: &Settings) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let base = format!(
        "{}{}",
        settings.seed_base_url.trim_end_matches('/'),
        settings.base_path()
    );
    tracing::info!(%base, "Seeding demo data.");

    let mut scientist_ids = Vec::new();
    for payload in demo_scientists() {
        let created = post(&client, &format!("{base}/scientists"), &payload).await?;
        scientist_ids.push(record_id(&created)?);
    }

    let mut conference_ids = Vec::new();
    for payload in demo_conferences() {
        let created = post(&client, &format!("{base}/conferences"), &payload).await?;
        conference_ids.push(record_id(&created)?);
    }

    let mut participations = 0;
    for (scientist_idx, conference_idx, payload) in demo_participations() {
        let mut payload = payload;
        payload["scientistId"] = json!(scientist_ids[scientist_idx]);
        payload["conferenceId"] = json!(conference_ids[conference_idx]);
        post(&client, &format!("{base}/participations"), &payload).await?;
        participations += 1;
    }

    tracing::info!(
        scientists = scientist_ids.len(),
        conferences = conference_ids.len(),
        participations,
        "Seed complete."
    );
    Ok(())
}

async fn post(client: &reqwest::Client, url: &str, body: &Value) -> anyhow::Result<Value> {
    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        .with_context(|| format!("POST {url} failed to send"))?;
    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        bail!("POST {url} returned {status}: {detail}");
    }
    response
        .json::<Value>()
        .await
        .with_context(|| format!("POST {url} returned a non-JSON body"))
}

fn record_id(record: &Value) -> anyhow::Result<i64> {
    record["id"]
        .as_i64()
        .context("created record carries no integer id")
}

fn demo_scientists() -> Vec<Value> {
    vec![
        json!({
            "fullName": "Ingrid Solberg",
            "country": "Norway",
            "degree": "PhD",
            "specialization": "Marine Biology",
            "organization": "University of Bergen",
            "email": "ingrid.solberg@uib.example.org",
            "orcid": "0000-0002-1825-0097",
            "hIndex": 24
        }),
        json!({
            "fullName": "Tomás Herrera",
            "country": "Chile",
            "degree": "PhD",
            "specialization": "Astrophysics",
            "organization": "Universidad de Atacama",
            "email": "t.herrera@uda.example.org",
            "hIndex": 31
        }),
        json!({
            "fullName": "Priya Raghavan",
            "country": "India",
            "degree": "Dr. habil.",
            "specialization": "Distributed Systems",
            "organization": "IISc Bangalore",
            "hIndex": 18
        }),
        json!({
            "fullName": "Jonas Weiss",
            "country": "Germany",
            "degree": "MSc",
            "specialization": "Climate Modelling",
            "organization": "MPI for Meteorology"
        }),
    ]
}

fn demo_conferences() -> Vec<Value> {
    vec![
        json!({
            "topic": "Oceanography",
            "name": "Nordic Marine Science Forum",
            "country": "Norway",
            "location": "Bergen",
            "date": "2026-05-12T09:00:00Z",
            "capacity": 250
        }),
        json!({
            "topic": "Astronomy",
            "name": "Southern Skies Symposium",
            "country": "Chile",
            "location": "San Pedro de Atacama",
            "date": "2026-09-03T08:30:00Z",
            "capacity": 120
        }),
        json!({
            "topic": "Computer Science",
            "name": "Scalable Systems Conference",
            "country": "Germany",
            "location": "Hamburg",
            "date": "2026-11-20T10:00:00Z",
            "capacity": 400
        }),
    ]
}

/// (scientist index, conference index, payload without the foreign keys).
fn demo_participations() -> Vec<(usize, usize, Value)> {
    vec![
        (
            0,
            0,
            json!({
                "talkTitle": "Fjord ecosystems under warming currents",
                "participationType": "keynote",
                "durationMinutes": 60,
                "metadata": { "keywords": ["fjord", "warming"], "slides": true }
            }),
        ),
        (
            1,
            1,
            json!({
                "talkTitle": "Transient surveys from the Atacama plateau",
                "participationType": "talk",
                "durationMinutes": 30,
                "status": "pending",
                "metadata": { "keywords": ["transients", "survey"] }
            }),
        ),
        (
            2,
            2,
            json!({
                "talkTitle": "Consensus at the edge of the pool",
                "participationType": "talk",
                "durationMinutes": 45,
                "metadata": { "keywords": ["consensus", "pooling"], "recording": false }
            }),
        ),
        (
            3,
            0,
            json!({
                "talkTitle": "Coupled ocean-atmosphere models, revisited",
                "participationType": "poster",
                "durationMinutes": 15,
                "status": "pending"
            }),
        ),
        (
            2,
            0,
            json!({
                "talkTitle": "Replicated logs for sensor networks",
                "participationType": "workshop",
                "durationMinutes": 90,
                "metadata": { "keywords": ["replication"], "lab": "open" }
            }),
        ),
    ]
}
