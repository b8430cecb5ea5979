use chrono::Days;
use chrono::NaiveDate;

use crate::document::new_id;
use crate::document::Contact;
use crate::document::Document;
use crate::document::Goal;
use crate::document::Metrics;
use crate::document::Post;
use crate::document::Task;
use crate::views::iso_day;

const QUICK_NOTES: &str = "Hook idea: “If I started over with 0 followers, I’d do THIS…”\n\
Offer: limited-time bundle (pins + reels + captions)\n\
CTA: comment “BOSS” for the link.";

const NOTES_VAULT: &str = "Hooks\n\
- Stop scrolling if you sell ___\n\
- 3 signs you're underpricing\n\
\n\
Scripts\n\
- Behind-the-scenes: pack orders + voiceover\n\
\n\
Offers\n\
- Starter bundle: 7-day content plan + templates";

pub fn sample_document(today: NaiveDate) -> Document {
    let offset = |days: u64| {
        today
            .checked_add_days(Days::new(days))
            .map(iso_day)
            .unwrap_or_default()
    };
    let (d1, d2, d3) = (offset(1), offset(3), offset(6));

    let post = |date: &str, platform: &str, post_type: &str, title: &str, hook: &str| Post {
        id: new_id(),
        date: date.to_string(),
        platform: platform.to_string(),
        post_type: post_type.to_string(),
        title: title.to_string(),
        hook: hook.to_string(),
    };
    let task = |text: &str, priority: &str, due: &str| Task {
        id: new_id(),
        text: text.to_string(),
        priority: priority.to_string(),
        due: due.to_string(),
        done: false,
    };
    let contact = |name: &str, tag: &str, handle: &str, notes: &str| Contact {
        id: new_id(),
        name: name.to_string(),
        tag: tag.to_string(),
        handle: handle.to_string(),
        notes: notes.to_string(),
    };
    let goal = |title: &str, target: f64, progress: f64| Goal {
        id: new_id(),
        title: title.to_string(),
        target,
        progress,
    };

    Document {
        posts: vec![
            post(
                &d1,
                "Instagram",
                "Reel / Short",
                "3 mistakes killing your sales",
                "Stop scrolling if you're a business owner...",
            ),
            post(
                &d2,
                "TikTok",
                "Behind-the-scenes",
                "Pack orders with me",
                "Come with me while I ship today’s orders",
            ),
            post(
                &d3,
                "Pinterest",
                "Pin",
                "Offer graphic set (3 pins)",
                "Save this to post later",
            ),
        ],
        tasks: vec![
            task("Film 2 reels (hook + demo)", "Gold (High)", &d1),
            task("Batch captions for 5 posts", "Pink (Medium)", &d2),
            task("DM 5 collab leads", "Gold (High)", &d2),
            task("Create 3 Pinterest graphics", "Pink (Medium)", &d3),
            task("Update link-in-bio offer", "Black (Low)", ""),
        ],
        contacts: vec![
            contact(
                "Lush Boutique PR",
                "Brand Deal",
                "@lushboutique",
                "Interested in 2 reels + 3 pins package",
            ),
            contact(
                "Glow Lash Studio",
                "Client",
                "hello@glowlash.co",
                "Needs weekly content calendar + captions",
            ),
        ],
        goals: vec![
            goal("+500 followers this month", 500.0, 140.0),
            goal("$2,000 revenue from social (MTD)", 2000.0, 520.0),
        ],
        metrics: Metrics {
            revenue: 520.0,
            clicks: 184.0,
            deals: 1.0,
            leads: 9.0,
        },
        quick_notes: QUICK_NOTES.to_string(),
        notes_vault: NOTES_VAULT.to_string(),
        ..Document::default()
    }
}
