use serde_json::Value;
use umbra::solve;

#[test]
fn test_total_eclipse_to_json() {
    let result = solve(35.0, -83.0).unwrap();
    let json: Value = serde_json::to_value(&result).unwrap();

    assert_eq!(json["eclipse_type"], "Total");
    assert_eq!(json["obscuration"], 1.0);
    assert!(json["magnitude"].as_f64().unwrap() > 1.0);

    let c2 = &json["c2"];
    assert_eq!(c2["event_kind"], "C2");
    assert_eq!(c2["visibility"], "AboveHorizon");
    assert_eq!(c2["local_time"]["date"]["year"], 2017);
    assert_eq!(c2["local_time"]["hour"], 18);
    assert_eq!(c2["local_time"]["minute"], 36);
    assert_eq!(c2["convergence"]["converged"], true);

    // Internal solver state stays out of the payload
    assert!(c2.get("circumstance").is_none());
    assert!(c2.get("epoch").is_none());
}

#[test]
fn test_missing_contacts_are_null() {
    let partial = serde_json::to_value(solve(40.7128, -74.006).unwrap()).unwrap();
    assert_eq!(partial["eclipse_type"], "Partial");
    assert!(partial["c2"].is_null() && partial["c3"].is_null());
    assert!(partial["c1"].is_object());

    let none = serde_json::to_value(solve(-33.9, 18.4).unwrap()).unwrap();
    assert_eq!(none["eclipse_type"], "None");
    assert!(none["c1"].is_null());
    // Closest approach is still reported
    assert_eq!(none["mid"]["event_kind"], "MidEclipse");
}
