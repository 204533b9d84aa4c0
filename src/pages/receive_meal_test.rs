use super::*;

#[test]
fn validate_claim_requires_donation() {
    assert_eq!(validate_claim(None, "Grace"), Err("Choose a meal to claim."));
}

#[test]
fn validate_claim_requires_name() {
    assert_eq!(validate_claim(Some(4), ""), Err("Enter your name."));
}

#[test]
fn validate_claim_trims_name() {
    assert_eq!(
        validate_claim(Some(4), " Grace Hopper "),
        Ok(DonationClaimCreate { donation_id: 4, name: "Grace Hopper".to_owned() })
    );
}
