//! Schema prompts for the two media kinds.
//!
//! Each prompt spells out the exact field list and value domains the model
//! must produce; the reply is validated against the same domains in
//! [`crate::schema`] before anything reaches the dataset store.

/// The analysis prompt for a single video advertisement.
pub const VIDEO_ANALYSIS_PROMPT: &str = r#"Analyze this video advertisement objectively for targeting and marketing effectiveness.

Respond with a single JSON object containing exactly these fields:

{
    "product_name": "what product or service the ad promotes",
    "targeting_type": "first_impression" or "retargeting",
    "verbosity": "low", "medium" or "high",
    "hook_rating": 1-5,
    "purchase_urgency": "low", "medium" or "high",
    "conversion_focused": true/false,
    "message_types": ["humor", "storytelling", "demonstration", "emotional_appeal", "problem_solution"],
    "activity_level": "sedentary", "moderate" or "dynamic",
    "music_intensity": "low", "medium" or "high",
    "product_visibility": "low", "medium" or "high",
    "target_age_range": "specific age range like 18-25, 25-35, 35-50, 50+",
    "target_income_level": "low", "middle", "high" or "mixed",
    "target_geographic_area": "specific geographic type that the ad targets (such as 'X county, East Coast US')",
    "target_interests": ["list", "of", "customer", "interests", "(up to 3)"],
    "visual_motifs": ["3 to 5 recurring visual elements"],
    "fear_index": 0.0-1.0,
    "comfort_index": 0.0-1.0,
    "humor_index": 0.0-1.0,
    "success_index": 0.0-1.0,
    "love_index": 0.0-1.0,
    "family_index": 0.0-1.0,
    "adventure_index": 0.0-1.0,
    "nostalgia_index": 0.0-1.0,
    "health_index": 0.0-1.0,
    "luxury_index": 0.0-1.0,
    "color_palette": ["up to 5 dominant colors as #rrggbb hex codes"],
    "scene_cuts": [0.0, 2.4, 5.1]
}

ANALYSIS CRITERIA:
- targeting_type: "first_impression" if introducing brand/product, "retargeting" if assumes familiarity
- verbosity: how dense the spoken and written messaging is; "low" for mostly visual ads
- hook_rating: 1=non-engaging start, 5=EXTREMELY gripping/interesting first few seconds (stunt occurs, something unexpected happens). Remember the AVERAGE video is a 2.5
- purchase_urgency: "high" for limited-time offers and hard CTAs, "low" for pure brand awareness
- conversion_focused: true if has a clear IMMEDIATE call-to-action (download, buy now), false if just building awareness
- message_types: every persuasion style the ad uses, from the listed values only
- activity_level: overall pace of what is shown on screen
- music_intensity: energy of the soundtrack; "low" when there is none
- product_visibility: how prominently the product itself appears
- target_age_range / target_income_level / target_geographic_area / target_interests: infer from language, references, pricing cues, setting and lifestyle depicted
- Each *_index scores the presence of that thematic imagery from 0.0 (absent) to 1.0 (dominant), in steps of 0.1
- scene_cuts: timestamps of hard cuts between scenes, in plain seconds from the start as decimal numbers

Be objective and analytical. Base conclusions on concrete evidence from the footage, audio and on-screen text."#;

/// The analysis prompt for a single image advertisement.
pub const IMAGE_ANALYSIS_PROMPT: &str = r#"Analyze this image advertisement objectively for targeting and marketing effectiveness.

Respond with a single JSON object containing exactly these fields:

{
    "product_name": "what product or service the ad promotes",
    "targeting_type": "first_impression" or "retargeting",
    "visual_appeal_rating": 1-5,
    "comprehension_rating": 1-5,
    "purchase_urgency": "low", "medium" or "high",
    "conversion_focused": true/false,
    "message_types": ["humor", "storytelling", "demonstration", "emotional_appeal", "problem_solution"],
    "target_age_range": "specific age range like 18-25, 25-35, 35-50, 50+",
    "target_income_level": "low", "middle", "high" or "mixed",
    "target_geographic_area": "specific area type",
    "target_interests": ["up to 3 interests"],
    "visual_motifs": ["3 to 5 recurring visual elements"],
    "fear_index": 0.0-1.0,
    "comfort_index": 0.0-1.0,
    "humor_index": 0.0-1.0,
    "success_index": 0.0-1.0,
    "love_index": 0.0-1.0,
    "family_index": 0.0-1.0,
    "adventure_index": 0.0-1.0,
    "nostalgia_index": 0.0-1.0,
    "health_index": 0.0-1.0,
    "luxury_index": 0.0-1.0,
    "color_palette": ["up to 5 dominant colors as #rrggbb hex codes"]
}

ANALYSIS CRITERIA:
- visual_appeal_rating: 1=unappealing, 5=extremely eye-catching
- comprehension_rating: 1=requires the viewer to really think to understand the message, 5=crystal clear message, even a toddler could understand
- targeting_type: "first_impression" if introducing brand/product, "retargeting" if assumes familiarity
- Each *_index scores the presence of that thematic imagery from 0.0 (absent) to 1.0 (dominant), in steps of 0.1
- Other criteria follow the same definitions as for video analysis

Analyze independently based on text, colors and visual elements."#;
