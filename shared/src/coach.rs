//! Offline coach
//!
//! Builds a deterministic templated reply from the profile, the BMI and
//! keyword matching on the question. Used whenever the external generator
//! is not configured or fails.

use crate::health_metrics::{bmi_status, classify_bmi, display_number, BmiCategory};
use crate::models::Profile;

/// Diet and food keywords, checked first
pub const DIET_KEYWORDS: &[&str] = &["diet", "meal", "food", "eat", "nutrition", "calorie"];
/// Workout keywords, checked second
pub const WORKOUT_KEYWORDS: &[&str] = &["workout", "exercise", "gym", "training", "run", "walk"];
/// Weight management keywords, checked third
pub const WEIGHT_KEYWORDS: &[&str] = &["weight", "fat", "lose", "gain", "bulk", "cut"];

/// Question topic, in routing priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Diet,
    Workout,
    WeightManagement,
    General,
}

impl Topic {
    /// Route a question by case-insensitive substring match.
    ///
    /// Diet wins over workout, which wins over weight management.
    pub fn detect(question: &str) -> Topic {
        let q = question.to_lowercase();
        let mentions = |keywords: &[&str]| keywords.iter().any(|k| q.contains(k));

        if mentions(DIET_KEYWORDS) {
            Topic::Diet
        } else if mentions(WORKOUT_KEYWORDS) {
            Topic::Workout
        } else if mentions(WEIGHT_KEYWORDS) {
            Topic::WeightManagement
        } else {
            Topic::General
        }
    }
}

/// One-day meal plan template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealPlan {
    /// BMI unknown
    Balanced,
    /// Underweight: gentle surplus
    LeanGain,
    /// Normal: maintenance
    Maintenance,
    /// Overweight: mild deficit
    MildDeficit,
    /// Obese: higher protein and fiber
    HighProtein,
}

impl MealPlan {
    pub fn for_bmi(bmi: Option<f64>) -> MealPlan {
        match bmi.map(classify_bmi) {
            None => MealPlan::Balanced,
            Some(BmiCategory::Underweight) => MealPlan::LeanGain,
            Some(BmiCategory::Normal) => MealPlan::Maintenance,
            Some(BmiCategory::Overweight) => MealPlan::MildDeficit,
            Some(BmiCategory::Obese) => MealPlan::HighProtein,
        }
    }

    /// Line introducing the plan
    pub fn heading(&self) -> &'static str {
        match self {
            MealPlan::Balanced => "Here’s a balanced one-day plan:\n",
            MealPlan::LeanGain => "Goal: gentle surplus to gain lean mass.\n",
            MealPlan::Maintenance => "Goal: maintenance with high protein and fiber.\n",
            MealPlan::MildDeficit => "Goal: mild calorie deficit with adequate protein.\n",
            MealPlan::HighProtein => "Goal: higher protein, higher fiber, lower refined carbs.\n",
        }
    }

    /// Meals with portions, one per line
    pub fn meals(&self) -> &'static str {
        match self {
            MealPlan::Balanced => concat!(
                "- Breakfast: Oats 60g with milk/yogurt, 1 fruit, 10 nuts\n",
                "- Lunch: Mixed veg bowl (2 cups) + dal 1 cup + brown rice 1 cup or 2 chapati\n",
                "- Snack: Greek yogurt 150g or sprouts bowl 1 cup\n",
                "- Dinner: Grilled paneer/tofu/chicken 130–150g + salad 2 cups\n",
            ),
            MealPlan::LeanGain => concat!(
                "- Breakfast: Oats 80g with milk/yogurt, 1 banana, 15 nuts\n",
                "- Lunch: 2 cups veg + dal 1.5 cups + rice 1.5 cups or 3 chapati + 1 tsp ghee\n",
                "- Snack: Peanut butter sandwich (2 slices) or chana chaat 1.5 cups\n",
                "- Dinner: Paneer/tofu/chicken 170–200g + rice 1–1.5 cups + salad 1 cup\n",
                "- Add-ons: 1 cup milk or yogurt after dinner if needed\n",
            ),
            MealPlan::Maintenance => concat!(
                "- Breakfast: Oats 60g with milk/yogurt, 1 fruit, 10 nuts\n",
                "- Lunch: 2 cups veg + dal 1 cup + rice 1 cup or 2 chapati\n",
                "- Snack: Greek yogurt 150g or sprouts 1 cup\n",
                "- Dinner: Paneer/tofu/chicken 140–170g + salad 2 cups + small carb (½ cup rice or 1 chapati)\n",
            ),
            MealPlan::MildDeficit => concat!(
                "- Breakfast: Veg omelet (2 eggs) or tofu scramble + oats 40g\n",
                "- Lunch: 2 cups veg + dal/beans 1–1.2 cups + brown rice ½–1 cup or 1–2 chapati\n",
                "- Snack: Fruit + 10 nuts or buttermilk 250ml\n",
                "- Dinner: Paneer/tofu/chicken 150–180g + salad 2–3 cups (olive oil 1 tsp)\n",
            ),
            MealPlan::HighProtein => concat!(
                "- Breakfast: Greek yogurt 200g + berries/fruit + chia 1 tbsp\n",
                "- Lunch: Large salad (3 cups) + paneer/tofu/chicken 170–200g + dal ¾ cup\n",
                "- Snack: Sprouts 1 cup or whey/soy shake\n",
                "- Dinner: Non-starchy veg 3 cups + lean protein 170–200g\n",
            ),
        }
    }

    /// Closing advice after the meals
    pub fn closing(&self) -> &'static str {
        match self {
            MealPlan::Balanced | MealPlan::Maintenance => "Hydrate 2–3L/day.",
            MealPlan::LeanGain => "Protein 1.6–2.0g/kg, 7–8h sleep.",
            MealPlan::MildDeficit => "Aim 7–9k steps/day.",
            MealPlan::HighProtein => "Hydrate 2.5–3L/day.",
        }
    }

    /// Full plan text: heading, meals, closing
    pub fn render(&self) -> String {
        [self.heading(), self.meals(), self.closing()].concat()
    }
}

const WORKOUT_ROUTINE: &str = concat!(
    "Try a simple 20–25 min routine:\n",
    "1) Warm-up 3 min (march in place, arm circles)\n",
    "2) 3 rounds: 40s bodyweight squats, 40s push-ups (knee ok), 40s glute bridge, 40s plank, 40s rest\n",
    "3) Finish with 5–8 min easy walk and stretches.\n",
    "Aim 7–9k steps/day on non-gym days.",
);

const FAT_LOSS_TIP: &str =
    "For fat loss, keep a mild calorie deficit and 1.6–2.2g protein/kg body weight.";
const SURPLUS_TIP: &str =
    "Focus on a slight calorie surplus with 1.6–2.0g protein/kg and progressive strength training.";
const WEIGHT_TIP_CLOSING: &str = " Track steps and sleep 7–8 hours.";

const GENERAL_TIPS: &str = "General tips: 7–8h sleep, 7–9k steps/day, 2–3L water, protein each meal, and strength training 2–3x/week.";

/// Greeting that opens every reply
pub fn intro(profile: &Profile, bmi: Option<f64>) -> String {
    let shown_bmi = bmi.map(display_number).unwrap_or_else(|| "unavailable".to_string());
    format!(
        "Hi {}! Your BMI is {} ({}). ",
        profile.greeting_name(),
        shown_bmi,
        bmi_status(bmi)
    )
}

/// Build the templated reply for a question
pub fn offline_reply(profile: &Profile, bmi: Option<f64>, question: &str) -> String {
    let body = match Topic::detect(question) {
        Topic::Diet => MealPlan::for_bmi(bmi).render(),
        Topic::Workout => WORKOUT_ROUTINE.to_string(),
        Topic::WeightManagement => {
            let tip = match bmi {
                Some(b) if classify_bmi(b) == BmiCategory::Underweight => SURPLUS_TIP,
                _ => FAT_LOSS_TIP,
            };
            format!("{}{}", tip, WEIGHT_TIP_CLOSING)
        }
        Topic::General => GENERAL_TIPS.to_string(),
    };

    intro(profile, bmi) + &body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health_metrics::calculate_bmi;
    use proptest::prelude::*;
    use rstest::rstest;

    fn profile(name: &str, weight_kg: f64, height_cm: f64) -> Profile {
        Profile {
            name: name.to_string(),
            age: 30,
            weight_kg,
            height_cm,
        }
    }

    #[rstest]
    #[case("What should I eat?", Topic::Diet)]
    #[case("Give me a MEAL idea", Topic::Diet)]
    #[case("Best gym split?", Topic::Workout)]
    #[case("How do I lose belly fat", Topic::WeightManagement)]
    #[case("How much should I sleep", Topic::General)]
    #[case("", Topic::General)]
    fn test_topic_detection(#[case] question: &str, #[case] expected: Topic) {
        assert_eq!(Topic::detect(question), expected);
    }

    #[test]
    fn test_diet_beats_workout() {
        assert_eq!(Topic::detect("diet and exercise routine"), Topic::Diet);
        assert_eq!(Topic::detect("what to eat after a run"), Topic::Diet);
    }

    #[test]
    fn test_workout_beats_weight() {
        assert_eq!(Topic::detect("training to cut weight"), Topic::Workout);
    }

    #[test]
    fn test_normal_bmi_diet_reply_verbatim() {
        let p = profile("Asha", 70.0, 170.0);
        let bmi = calculate_bmi(p.weight_kg, p.height_cm);
        assert_eq!(bmi, Some(24.22));

        let reply = offline_reply(&p, bmi, "What should I eat?");
        let expected = concat!(
            "Hi Asha! Your BMI is 24.22 (Normal ✅). ",
            "Goal: maintenance with high protein and fiber.\n",
            "- Breakfast: Oats 60g with milk/yogurt, 1 fruit, 10 nuts\n",
            "- Lunch: 2 cups veg + dal 1 cup + rice 1 cup or 2 chapati\n",
            "- Snack: Greek yogurt 150g or sprouts 1 cup\n",
            "- Dinner: Paneer/tofu/chicken 140–170g + salad 2 cups + small carb (½ cup rice or 1 chapati)\n",
            "Hydrate 2–3L/day.",
        );
        assert_eq!(reply, expected);
    }

    #[test]
    fn test_underweight_diet_plan_is_gain_oriented() {
        let p = profile("Ravi", 50.0, 170.0);
        let bmi = calculate_bmi(p.weight_kg, p.height_cm);
        assert_eq!(bmi, Some(17.3));

        let reply = offline_reply(&p, bmi, "diet plan");
        assert!(reply.starts_with("Hi Ravi! Your BMI is 17.3 (Underweight 😟). "));
        assert!(reply.contains("Goal: gentle surplus to gain lean mass.\n"));
        assert!(reply.ends_with("Protein 1.6–2.0g/kg, 7–8h sleep."));
    }

    #[rstest]
    #[case(None, MealPlan::Balanced)]
    #[case(Some(17.0), MealPlan::LeanGain)]
    #[case(Some(24.95), MealPlan::Maintenance)]
    #[case(Some(25.0), MealPlan::MildDeficit)]
    #[case(Some(30.0), MealPlan::HighProtein)]
    fn test_meal_plan_selection(#[case] bmi: Option<f64>, #[case] expected: MealPlan) {
        assert_eq!(MealPlan::for_bmi(bmi), expected);
    }

    #[test]
    fn test_unknown_bmi_reply() {
        let p = profile("", 70.0, 0.0);
        let reply = offline_reply(&p, None, "food?");
        assert!(reply.starts_with("Hi there! Your BMI is unavailable (Unknown). "));
        assert!(reply.contains("Here’s a balanced one-day plan:\n"));
        assert!(reply.ends_with("Hydrate 2–3L/day."));
    }

    #[test]
    fn test_weight_tips_follow_band() {
        let under = offline_reply(&profile("A", 50.0, 170.0), Some(17.3), "how to bulk");
        assert!(under.contains(SURPLUS_TIP));
        assert!(under.ends_with(" Track steps and sleep 7–8 hours."));

        let over = offline_reply(&profile("A", 90.0, 170.0), Some(31.14), "how to lose it");
        assert!(over.contains(FAT_LOSS_TIP));

        let unknown = offline_reply(&profile("A", 90.0, 0.0), None, "lose");
        assert!(unknown.contains(FAT_LOSS_TIP));
    }

    #[test]
    fn test_workout_and_general_replies() {
        let p = profile("Kim", 70.0, 170.0);
        let workout = offline_reply(&p, Some(24.22), "Exercise ideas?");
        assert!(workout.contains("Try a simple 20–25 min routine:\n"));
        assert!(workout.ends_with("Aim 7–9k steps/day on non-gym days."));

        let general = offline_reply(&p, Some(24.22), "hello");
        assert_eq!(
            general,
            format!("Hi Kim! Your BMI is 24.22 (Normal ✅). {}", GENERAL_TIPS)
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: appending an exercise keyword never moves a diet question
        /// out of the diet branch
        #[test]
        fn prop_diet_priority(prefix in "[a-z ]{0,20}", suffix in "[a-z ]{0,20}") {
            let question = format!("{}diet{}exercise", prefix, suffix);
            prop_assert_eq!(Topic::detect(&question), Topic::Diet);
        }

        /// Property: the reply is a pure function of its inputs
        #[test]
        fn prop_offline_reply_deterministic(
            weight in 30.0f64..200.0,
            height in 120.0f64..220.0,
            question in ".{0,40}"
        ) {
            let p = profile("Sam", weight, height);
            let bmi = calculate_bmi(weight, height);
            prop_assert_eq!(offline_reply(&p, bmi, &question), offline_reply(&p, bmi, &question));
        }
    }
}
