//! Display order of the request queue

use aeroreach_shared::MedicalRequest;
use std::cmp::Ordering;

/// Emergencies first, then newest first
pub fn compare(a: &MedicalRequest, b: &MedicalRequest) -> Ordering {
    b.is_emergency
        .cmp(&a.is_emergency)
        .then_with(|| b.timestamp.cmp(&a.timestamp))
}

/// Sort in place; requests with equal keys keep their relative order
pub fn sort(requests: &mut [MedicalRequest]) {
    requests.sort_by(compare);
}

/// Ordered copy of `requests`
pub fn order(requests: &[MedicalRequest]) -> Vec<MedicalRequest> {
    let mut sorted = requests.to_vec();
    sort(&mut sorted);
    sorted
}
