// SPDX-License-Identifier: Apache-2.0
#![allow(dead_code)]
#![allow(clippy::expect_used)]
//! A realistic feeder slice used across the integration tests.
//!
//! The fixture is a cut-down distribution feeder: a backbone of nodes joined
//! by underground lines, three transformer spurs off the first node, a
//! triplex meter carrying three houses with their loads, plus the deliberate
//! oddities real exports contain — an orphan load whose parent does not
//! exist, an orphan line whose endpoints do not exist, two lines strung
//! between houses, a child whose parent is a line, and a regulator feeding a
//! load directly.

use std::collections::BTreeMap;

use feeder_core::{FeederObject, FeederTree};
use serde_json::json;

pub const WEIRD_NODE_1: &str = "0";
pub const WEIRD_NODE_2: &str = "1";
pub const NODE_1: &str = "245000";
pub const NODE_1_LINE_1: &str = "368700";
pub const NODE_1_LINE_1_END: &str = "285800";
pub const NODE_1_LINE_1_END_CHILD_1: &str = "326000";
pub const NODE_1_LINE_2: &str = "368500";
pub const NODE_1_LINE_2_END: &str = "285600";
pub const NODE_1_LINE_2_END_CHILD_1: &str = "325800";
pub const NODE_1_LINE_3: &str = "368600";
pub const NODE_1_LINE_3_END: &str = "285700";
pub const NODE_1_LINE_3_END_CHILD_1: &str = "325900";
pub const NODE_1_LINE_4: &str = "116900";
pub const NODE_2: &str = "244900";
pub const NODE_2_LINE_1: &str = "117200";
pub const NODE_2_LINE_2: &str = "116800";
pub const NODE_2_LINE_2_END: &str = "140120";
pub const NODE_2_LINE_2_END_CHILD_1: &str = "60720";
pub const NODE_2_LINE_3: &str = "117600";
pub const NODE_2_LINE_3_END: &str = "140220";
pub const NODE_2_LINE_3_END_LINE: &str = "52220";
pub const NODE_2_LINE_3_END_LINE_END: &str = "140320";
pub const NODE_3: &str = "136420";
pub const NODE_3_LINE_1: &str = "46420";
pub const NODE_3_LINE_1_END: &str = "136520";
pub const NODE_3_LINE_1_END_CHILD_1: &str = "172262";
pub const NODE_3_LINE_1_END_CHILD_1_CHILD_1: &str = "172263";
pub const NODE_3_LINE_1_END_CHILD_1_CHILD_2: &str = "172295";
pub const NODE_3_LINE_1_END_CHILD_2: &str = "172260";
pub const NODE_3_LINE_1_END_CHILD_2_CHILD_1: &str = "172261";
pub const NODE_3_LINE_1_END_CHILD_3: &str = "172264";
pub const ORPHAN_NODE_1: &str = "172265";
pub const ORPHAN_LINE_1: &str = "33420";
pub const FUNKY_LINE_1: &str = "121212";
pub const FUNKY_LINE_2: &str = "343434";
pub const CHILD_OF_LINE: &str = "00900";
pub const LINE_TO_LOAD: &str = "113118";

/// The fixture as it would arrive on disk: string keys, string-typed
/// coordinates on some records, numeric coordinates on others.
pub fn raw_records() -> serde_json::Value {
    json!({
        WEIRD_NODE_1: {
            "timezone": "PST+8PDT",
            "stoptime": "'2000-01-02 00:00:00'",
            "starttime": "'2000-01-01 00:00:00'",
            "clock": "clock"
        },
        WEIRD_NODE_2: {
            "omftype": "#set",
            "argument": "minimum_timestep=60"
        },
        NODE_1: {
            "phases": "ABC",
            "name": "nodeT10263825298",
            "object": "node",
            "longitude": "571.1273158682793",
            "nominal_voltage": "7200.0",
            "latitude": "279.0611346507024"
        },
        NODE_1_LINE_1: {
            "phases": "BS",
            "from": "nodeT10263825298",
            "name": "T10263_B",
            "object": "transformer",
            "to": "nodeS1707-03-015T10263_B",
            "configuration": "1807--T325_B-CONFIG"
        },
        NODE_1_LINE_1_END: {
            "phases": "BS",
            "name": "nodeS1707-03-015T10263_B",
            "object": "triplex_meter",
            "longitude": "594.4864602890987",
            "nominal_voltage": "120",
            "latitude": "255.701990229883"
        },
        NODE_1_LINE_1_END_CHILD_1: {
            "phases": "BS",
            "name": "S1707-03-015_B",
            "parent": "nodeS1707-03-015T10263_B",
            "object": "triplex_node",
            "longitude": "622.0927218773398",
            "latitude": "253.57843164617213"
        },
        NODE_1_LINE_2: {
            "phases": "AS",
            "from": "nodeT10263825298",
            "name": "T10263_A",
            "object": "transformer",
            "to": "nodeS1707-03-015T10263_A",
            "configuration": "T10285_A-CONFIG"
        },
        NODE_1_LINE_2_END: {
            "phases": "AS",
            "name": "nodeS1707-03-015T10263_A",
            "object": "triplex_meter",
            "longitude": "619.4382736477013",
            "latitude": "297.6422560567061"
        },
        NODE_1_LINE_2_END_CHILD_1: {
            "phases": "AS",
            "name": "S1707-03-015_A",
            "parent": "nodeS1707-03-015T10263_A",
            "object": "triplex_node",
            "longitude": "605.104253207653",
            "latitude": "320.47051083159784"
        },
        NODE_1_LINE_3: {
            "phases": "CS",
            "from": "nodeT10263825298",
            "name": "T10263_C",
            "object": "transformer",
            "to": "nodeS1707-03-015T10263_C",
            "configuration": "1807--T325_C-CONFIG"
        },
        NODE_1_LINE_3_END: {
            "phases": "CS",
            "name": "nodeS1707-03-015T10263_C",
            "object": "triplex_meter",
            "longitude": "563.6948608252912",
            "latitude": "243.49152837354555"
        },
        NODE_1_LINE_3_END_CHILD_1: {
            "phases": "CS",
            "name": "S1707-03-015_C",
            "parent": "nodeS1707-03-015T10263_C",
            "object": "triplex_node",
            "longitude": "545.644612863749",
            "latitude": "228.09572864164187"
        },
        NODE_1_LINE_4: {
            "phases": "ACB",
            "from": "node825298923940",
            "name": "825298",
            "object": "underground_line",
            "to": "nodeT10263825298",
            "length": "621",
            "configuration": "825456-LINECONFIG"
        },
        NODE_2: {
            "phases": "ABC",
            "name": "node825298923940",
            "object": "node",
            "longitude": "529.037660472",
            "nominal_voltage": "7200.0",
            "latitude": "274.670992574"
        },
        NODE_2_LINE_1: {
            "phases": "B",
            "from": "node825298923940",
            "name": "923941",
            "object": "underground_line",
            "to": "nodeT6247418245957866",
            "length": "417",
            "configuration": "825117-LINECONFIG"
        },
        NODE_2_LINE_2: {
            "phases": "ACB",
            "from": "node7055970558",
            "name": "923940",
            "object": "underground_line",
            "to": "node825298923940",
            "length": "630",
            "configuration": "923991-LINECONFIG"
        },
        NODE_2_LINE_2_END: {
            "phases": "ABCN",
            "name": "node7055970558",
            "object": "node",
            "longitude": "558.3859643660142",
            "nominal_voltage": "7200.0",
            "latitude": "312.50718234414836"
        },
        NODE_2_LINE_2_END_CHILD_1: {
            "control": "VOLT",
            "object": "capacitor",
            "name": "CAP134",
            "parent": "node7055970558",
            "phases": "ABCN",
            "longitude": "620.7180398965284",
            "nominal_voltage": "2401.7771",
            "latitude": "470.93253526327317"
        },
        NODE_2_LINE_3: {
            "phases": "ACB",
            "from": "node825298923940",
            "name": "923942",
            "object": "underground_line",
            "to": "nodeT6246217033670559",
            "length": "1904",
            "configuration": "923991-LINECONFIG"
        },
        NODE_2_LINE_3_END: {
            "phases": "ABCN",
            "name": "nodeT6246217033670559",
            "object": "node",
            "longitude": "522.8163580888573",
            "nominal_voltage": "7200.0",
            "latitude": "345.42234039166664"
        },
        NODE_2_LINE_3_END_LINE: {
            "phases": "AN",
            "from": "nodeT6246217033670559",
            "name": "17127",
            "object": "overhead_line",
            "to": "nodeF526917127",
            "length": "25.2353",
            "configuration": "18949line_configuration24501"
        },
        NODE_2_LINE_3_END_LINE_END: {
            "phases": "AN",
            "name": "nodeF526917127",
            "object": "node",
            "longitude": "546.7063921556045",
            "nominal_voltage": "7200.0",
            "latitude": "360.28725047764266"
        },
        NODE_3: {
            "phases": "AN",
            "name": "nodeT6247418245957866",
            "object": "node",
            "longitude": "454.528228025527",
            "nominal_voltage": "7200.0",
            "latitude": "377.2278969234081"
        },
        NODE_3_LINE_1: {
            "phases": "AS",
            "from": "nodeT6247418245957866",
            "name": "T62474182459",
            "object": "transformer",
            "to": "node62474182499T62474182459",
            "configuration": "T62474206624transformer_configuration90001"
        },
        NODE_3_LINE_1_END: {
            "phases": "AS",
            "name": "node62474182499T62474182459",
            "object": "triplex_meter",
            "longitude": 410.7928844905687,
            "nominal_voltage": "120",
            "latitude": 467.61430322224993
        },
        NODE_3_LINE_1_END_CHILD_1: {
            "name": "house172262",
            "parent": "node62474182499T62474182459",
            "floor_area": "2200",
            "object": "house",
            "longitude": 276.67116431669666,
            "latitude": 441.3730674413469,
            "heating_system_type": "HEAT_PUMP"
        },
        NODE_3_LINE_1_END_CHILD_1_CHILD_1: {
            "parent": "house172262",
            "name": "ZIPload172263",
            "object": "ZIPload",
            "longitude": 274.72737127069854,
            "base_power": "LIGHTS*1.33",
            "latitude": 399.5815169523868
        },
        NODE_3_LINE_1_END_CHILD_1_CHILD_2: {
            "parent": "house172262",
            "tank_volume": "50",
            "object": "waterheater",
            "longitude": 237.79530339673374,
            "latitude": 479.2770614982388,
            "name": "waterheater172295"
        },
        NODE_3_LINE_1_END_CHILD_2: {
            "name": "house172260",
            "parent": "node62474182499T62474182459",
            "floor_area": "1400",
            "object": "house",
            "longitude": 359.2823687716179,
            "latitude": 523.0124050331971,
            "heating_system_type": "RESISTANCE"
        },
        NODE_3_LINE_1_END_CHILD_2_CHILD_1: {
            "parent": "house172260",
            "name": "ZIPload172261",
            "object": "ZIPload",
            "longitude": 319.4346113286559,
            "base_power": "LIGHTS*1.33",
            "latitude": 557.0287833381647
        },
        NODE_3_LINE_1_END_CHILD_3: {
            "name": "house172264",
            "parent": "node62474182499T62474182459",
            "floor_area": "1500",
            "object": "house",
            "longitude": 442.86546974953814,
            "latitude": 549.2536111541721,
            "heating_system_type": "RESISTANCE"
        },
        ORPHAN_NODE_1: {
            "parent": "madeUpHouse",
            "name": "ZIPload172265",
            "object": "ZIPload",
            "longitude": 409.82098796756964,
            "latitude": 588.129472074135
        },
        ORPHAN_LINE_1: {
            "phases": "ACBN",
            "from": "nodeDoesntExist1",
            "name": "17783",
            "object": "overhead_line",
            "longitude": 405.7790593997488,
            "to": "nodeDoesntExist2",
            "length": "338.245",
            "latitude": 614.664711377176
        },
        FUNKY_LINE_1: {
            "phases": "CS",
            "from": "house172262",
            "name": "Decepticon",
            "object": "transformer",
            "to": "house172260",
            "configuration": "1807--T325_C-CONFIG"
        },
        FUNKY_LINE_2: {
            "phases": "CS",
            "from": "house172260",
            "name": "AutoBot",
            "object": "transformer",
            "to": "house172264",
            "configuration": "1807--T325_C-CONFIG"
        },
        CHILD_OF_LINE: {
            "object": "waterheater",
            "name": "waterheater00900",
            "parent": "T62474182459",
            "longitude": 408.17398807424905,
            "latitude": 403.9973646798732
        },
        LINE_TO_LOAD: {
            "object": "regulator",
            "name": "regulator88",
            "from": "node7055970558",
            "to": "S1707-03-015_A",
            "phases": "A"
        }
    })
}

/// The fixture parsed into record form.
pub fn fixture_records() -> BTreeMap<String, FeederObject> {
    serde_json::from_value(raw_records()).expect("the fixture is well-formed")
}

/// The fixture loaded into a tree.
pub fn fixture_tree() -> FeederTree {
    FeederTree::from_records(fixture_records()).expect("the fixture keys are numeric")
}
