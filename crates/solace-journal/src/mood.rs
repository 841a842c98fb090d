use solace_core::models::journal::{JournalEntry, Mood, MoodCount, MoodSummary, MoodTrend};

/// Count entries per mood, in [`Mood::ALL`] order, and classify the balance
/// of positive (Happy, Calm) against negative (Sad, Anxious) moods. An empty
/// journal is balanced.
pub fn mood_summary(entries: &[JournalEntry]) -> MoodSummary {
    let counts: Vec<MoodCount> = Mood::ALL
        .into_iter()
        .map(|mood| MoodCount {
            mood,
            count: entries.iter().filter(|e| e.mood == mood).count() as u32,
        })
        .collect();

    let count_of = |moods: &[Mood]| -> u32 {
        counts
            .iter()
            .filter(|c| moods.contains(&c.mood))
            .map(|c| c.count)
            .sum()
    };
    let positive = count_of(&[Mood::Happy, Mood::Calm]);
    let negative = count_of(&[Mood::Sad, Mood::Anxious]);

    let trend = if positive > negative {
        MoodTrend::Positive
    } else if negative > positive {
        MoodTrend::Negative
    } else {
        MoodTrend::Balanced
    };

    MoodSummary { counts, trend }
}
