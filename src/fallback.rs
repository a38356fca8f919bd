//! Synthetic sample batch, substituted when every live source comes back
//! empty so the consumer-facing collection is never empty.

use chrono::{Duration, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::article::{Article, ArticleSeed};
use crate::sources::topic_placeholder;

pub const SAMPLE_BATCH_SIZE: usize = 12;

const SAMPLE_SOURCES: &[&str] = &[
    "The New York Times",
    "The Washington Post",
    "Reuters",
    "Associated Press",
    "BBC News",
    "CNN",
    "The Guardian",
    "Bloomberg",
];

struct Template {
    topic: &'static str,
    title: &'static str,
    description: &'static str,
    content: &'static str,
}

// Template wording is chosen so the scorer lands each article on its
// intended label; the batch spans all three without bypassing the
// classifier.
const TEMPLATES: &[Template] = &[
    Template {
        topic: "technology",
        title: "Apple Unveils New AI Features for iPhone",
        description: "The tech giant announced several assistant updates coming to its phones this fall.",
        content: "Apple today revealed a suite of new artificial intelligence features coming to iPhone with its next major software update, including smarter assistant interactions and photo editing powered by on-device models.",
    },
    Template {
        topic: "technology",
        title: "Microsoft Cloud Business Posts Impressive Growth",
        description: "Strong quarterly results beat expectations, a success analysts celebrate.",
        content: "Microsoft reported strong growth in its cloud division, with revenue increasing sharply compared to the same period last year and exceeding analyst expectations across every segment.",
    },
    Template {
        topic: "technology",
        title: "Tesla Faces Production Trouble for New Model",
        description: "Supply chain problems and a parts crisis damage the delivery timeline.",
        content: "Tesla is facing significant production setbacks for its newest vehicle. Component shortages have forced the company to revise its delivery schedule, a blow to customers holding pre-orders.",
    },
    Template {
        topic: "politics",
        title: "Senate Passes New Climate Bill",
        description: "The legislation includes funding for renewable energy projects across the country.",
        content: "The Senate today passed a comprehensive climate bill that allocates billions of dollars to renewable energy projects. The bill aims to cut carbon emissions by half by the end of the decade.",
    },
    Template {
        topic: "politics",
        title: "Infrastructure Deal a Win for Both Parties, Leaders Say",
        description: "Lawmakers celebrate progress on roads and broadband, with hope for growth.",
        content: "Congressional leaders unveiled an infrastructure agreement investing in the nation's roads, bridges, ports and broadband internet, funded through a mix of existing appropriations and new revenue.",
    },
    Template {
        topic: "politics",
        title: "Global Leaders Warn of Climate Emergency",
        description: "Summit opens amid fear that conflict and disaster will follow inaction.",
        content: "Leaders from forty countries convened this week to discuss emissions targets, as scientists warn that immediate action is necessary to prevent the worst effects of a warming planet.",
    },
    Template {
        topic: "health",
        title: "Study Shows Benefit of Mediterranean Diet",
        description: "Researchers report impressive improvement in heart health, a hopeful sign.",
        content: "A long-term study demonstrates measurable gains from following a Mediterranean diet. Participants showed better heart health markers, lower inflammation and reduced risk of chronic disease.",
    },
    Template {
        topic: "health",
        title: "Mental Health Apps See Surge in Usage",
        description: "Therapy and meditation apps report record numbers of new users this year.",
        content: "Mental health applications have experienced unprecedented adoption over the past year, with popular therapy and meditation apps reporting millions of new users.",
    },
    Template {
        topic: "health",
        title: "Hospital Funding Crisis Deepens",
        description: "Administrators fear worse staffing trouble as budgets decline.",
        content: "Hospital systems across several states are warning that budget shortfalls will force cuts to staffing and services, with rural facilities hit hardest by the squeeze.",
    },
];

const FILLER_TOPICS: &[&str] = &["world", "business", "science"];

/// Produces the fixed-size synthetic batch: every template, padded with
/// neutral fillers, `"#"` URLs throughout, topic-keyed placeholder images,
/// publication dates within the last week.
pub fn sample_batch() -> Vec<Article> {
    let mut rng = rand::rng();
    let mut articles = Vec::with_capacity(SAMPLE_BATCH_SIZE);

    for index in 0..SAMPLE_BATCH_SIZE {
        let (topic, title, description, content) = match TEMPLATES.get(index) {
            Some(template) => (
                template.topic.to_string(),
                template.title.to_string(),
                template.description.to_string(),
                template.content.to_string(),
            ),
            None => {
                let topic = FILLER_TOPICS[(index - TEMPLATES.len()) % FILLER_TOPICS.len()];
                (
                    topic.to_string(),
                    format!("Sample Article Title {}", index + 1),
                    format!(
                        "This is a sample description for article {}. It gives a brief overview of the story.",
                        index + 1
                    ),
                    format!(
                        "This is the full text of sample article {}. A live source would carry considerably more detail here.",
                        index + 1
                    ),
                )
            }
        };

        let days = rng.random_range(0..7);
        let hours = rng.random_range(0..24);
        let source = SAMPLE_SOURCES
            .choose(&mut rng)
            .copied()
            .unwrap_or("Newswire")
            .to_string();

        articles.push(Article::new(
            "sample",
            &topic,
            ArticleSeed {
                title,
                description,
                content,
                source,
                author: None,
                url: "#".to_string(),
                image_url: topic_placeholder(&topic),
                published_at: Utc::now() - Duration::days(days) - Duration::hours(hours),
            },
        ));
    }

    articles
}
