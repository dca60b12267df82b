//! Sample CMS records for offline runs, mirroring what the CMS serves.

use serde_json::{json, Value};

/// Three CMS-shaped articles, one per sample category.
pub fn sample_articles() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "attributes": {
                "title": "Inside the Autonomy Flight Stack: How Modern UAVs Think",
                "slug": "inside-the-autonomy-flight-stack",
                "excerpt": "A deep dive into the decision-making pipeline that powers autonomous UAV missions, from perception to planning.",
                "content": "Autonomous UAV systems combine sophisticated algorithms with robust hardware to execute complex missions with minimal human intervention.\nModern UAVs fuse LiDAR, RGB, thermal and inertial data into a 3D model of their environment.\nThe autonomy stack then runs that model through layered decision-making algorithms.",
                "featuredImage": {
                    "data": {
                        "attributes": {
                            "url": "/placeholder-post.png",
                            "alternativeText": "Autonomous flight system diagram"
                        }
                    }
                },
                "category": {
                    "data": { "id": 1, "attributes": { "name": "Autonomy", "slug": "autonomy" } }
                },
                "author": { "data": { "id": 1, "attributes": { "name": "Aarav Sharma" } } },
                "readTime": "12 min",
                "publishedAt": "2024-01-15T10:00:00.000Z"
            }
        }),
        json!({
            "id": 2,
            "attributes": {
                "title": "Why Your Drone Battery Doesn't Last, And How To Fix It",
                "slug": "battery-optimization-tips",
                "excerpt": "Understanding discharge curves, C-rating, power draw, and thermal management can increase battery life by 40%.",
                "content": "Battery performance remains one of the most critical factors in UAV operational effectiveness.\nLithium polymer packs discharge non-linearly, which shapes performance across the whole cycle.\nThermal management and adaptive power draw extend pack life without compromising the mission.",
                "featuredImage": {
                    "data": {
                        "attributes": {
                            "url": "/placeholder-post.png",
                            "alternativeText": "Battery optimization techniques"
                        }
                    }
                },
                "category": {
                    "data": { "id": 2, "attributes": { "name": "Power Systems", "slug": "power-systems" } }
                },
                "author": { "data": { "id": 2, "attributes": { "name": "Kavya Reddy" } } },
                "readTime": "10 min",
                "publishedAt": "2024-01-10T14:00:00.000Z"
            }
        }),
        json!({
            "id": 3,
            "attributes": {
                "title": "Advanced Sensor Fusion for Precision Navigation",
                "slug": "sensor-fusion-navigation",
                "excerpt": "Exploring how multi-sensor data fusion enables centimeter-level accuracy in GPS-denied environments.",
                "featuredImage": {
                    "data": {
                        "attributes": {
                            "url": "/placeholder-post.png",
                            "alternativeText": "Sensor fusion system architecture"
                        }
                    }
                },
                "category": {
                    "data": { "id": 3, "attributes": { "name": "Sensors", "slug": "sensors" } }
                },
                "author": { "data": { "id": 3, "attributes": { "name": "Rohan Mehta" } } },
                "readTime": "8 min",
                "publishedAt": "2024-01-08T09:30:00.000Z"
            }
        }),
    ]
}

pub fn sample_categories() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "attributes": {
                "name": "Autonomy",
                "slug": "autonomy",
                "description": "Autonomous systems and AI technologies for UAV operations"
            }
        }),
        json!({
            "id": 2,
            "attributes": {
                "name": "Power Systems",
                "slug": "power-systems",
                "description": "Battery management and power optimization for extended missions"
            }
        }),
        json!({
            "id": 3,
            "attributes": {
                "name": "Sensors",
                "slug": "sensors",
                "description": "Sensor technologies and data fusion algorithms"
            }
        }),
    ]
}
