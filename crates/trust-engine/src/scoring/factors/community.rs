use super::{FactorBuilder, FactorKind, TrustFactor};
use crate::scoring::domain::CodeHostingProfile;

pub fn score_community_engagement(profile: &CodeHostingProfile) -> TrustFactor {
    let mut factor = FactorBuilder::new(FactorKind::CommunityEngagement);

    let followers = profile.followers;
    let follower_points = match followers {
        500.. => 40.0,
        100..=499 => 30.0,
        50..=99 => 20.0,
        _ => (f64::from(followers) / 2.0).min(15.0),
    };
    factor.add(follower_points, format!("Followers: {followers}"));

    let ratio = f64::from(followers) / f64::from(profile.following.max(1));
    let ratio_points = if ratio >= 2.0 {
        30.0
    } else if ratio >= 1.0 {
        20.0
    } else {
        10.0
    };
    factor.add(ratio_points, format!("Follower/following ratio: {ratio:.2}"));

    let completeness = [
        (profile.has_bio, 10.0),
        (profile.has_website, 10.0),
        (profile.has_location, 5.0),
        (profile.has_company, 5.0),
    ]
    .iter()
    .filter(|(present, _)| *present)
    .map(|(_, points)| points)
    .sum::<f64>();
    factor.add(
        completeness,
        format!("Profile completeness: {completeness:.0}/30"),
    );

    if followers < 100 {
        factor.suggest("Engage with the developer community to grow your followers");
    }
    if completeness < 30.0 {
        factor.suggest("Complete your profile with a bio, website, location and company");
    }

    factor.finish()
}
