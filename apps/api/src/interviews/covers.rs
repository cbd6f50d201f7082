use rand::seq::SliceRandom;

/// Cover images served by the frontend's static assets.
pub const INTERVIEW_COVERS: [&str; 12] = [
    "/adobe.png",
    "/amazon.png",
    "/facebook.png",
    "/hostinger.png",
    "/pinterest.png",
    "/quora.png",
    "/reddit.png",
    "/skype.png",
    "/spotify.png",
    "/telegram.png",
    "/tiktok.png",
    "/yahoo.png",
];

pub fn random_cover() -> String {
    INTERVIEW_COVERS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(INTERVIEW_COVERS[0])
        .to_string()
}
