//! Prompt text and response schemas for the assistant calls

use serde_json::{json, Value};

use super::WeeklyStats;
use crate::companion::StudyView;
use crate::notes::strip_html;
use crate::roadmap::ResourceKind;

pub fn study_plan(subject: &str) -> String {
    format!(
        r#"Act as an expert curriculum designer. Create a comprehensive, step-by-step study plan for the topic: "{subject}".
The plan should be broken down into logical weekly phases.
For each phase, provide a checklist of specific topics or tasks.
For each topic, provide 2-4 diverse, high-quality learning resources. Include a variety of types like 'Article', 'Video', 'GitHub' for code examples, 'Documentation', and 'Paid Course' for structured learning.

Provide the following in JSON format:
1. 'courseName': A professional name for the study plan.
2. 'description': A brief, motivating overview.
3. 'prerequisites': A list of essential skills required.
4. 'phases': An array of weekly phases. Each phase has a 'title' (e.g. "Week 1-2: Core Concepts") and 'topics'.
   Each topic has 'text' (a concise, actionable description) and 'resources' (each with 'title', 'url' and 'type')."#
    )
}

fn resource_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "url": { "type": "STRING" },
            "type": { "type": "STRING", "enum": ResourceKind::KNOWN }
        },
        "required": ["title", "url", "type"]
    })
}

pub fn study_plan_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "courseName": { "type": "STRING", "description": "The name of the course or study plan." },
            "description": { "type": "STRING", "description": "A brief overview of the course." },
            "prerequisites": {
                "type": "ARRAY",
                "description": "A list of prerequisite skills.",
                "items": { "type": "STRING" }
            },
            "phases": {
                "type": "ARRAY",
                "description": "A list of weekly phases for the study plan.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "topics": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "text": { "type": "STRING" },
                                    "resources": { "type": "ARRAY", "items": resource_schema() }
                                },
                                "required": ["text", "resources"]
                            }
                        }
                    },
                    "required": ["title", "topics"]
                }
            }
        },
        "required": ["courseName", "description", "prerequisites", "phases"]
    })
}

pub fn quiz(note_content: &str) -> String {
    format!(
        "Based on the following study note content, generate a short multiple-choice quiz with 3-5 questions to test understanding. \
         For each question, provide 4 options and indicate the index of the correct answer.\n\nNote Content: \"{}\"",
        strip_html(note_content)
    )
}

pub fn quiz_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "questions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question": { "type": "STRING" },
                        "options": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "answer": { "type": "INTEGER", "description": "The 0-based index of the correct answer in the options array." }
                    },
                    "required": ["question", "options", "answer"]
                }
            }
        },
        "required": ["questions"]
    })
}

pub fn summary(note_content: &str) -> String {
    format!(
        "Please provide a concise summary of the following study note. Focus on the key points and main ideas. \
         The summary should be a single paragraph.\n\nNote Content: \"{}\"",
        strip_html(note_content)
    )
}

pub fn companion_instruction(context: StudyView) -> String {
    format!(
        "You are StudyHub's friendly AI companion. Your role is to be a supportive and knowledgeable study partner. \
         You are encouraging, patient, and smart.\n\
         - Answer questions related to study topics clearly and concisely.\n\
         - If a user seems stuck or frustrated, offer motivational support.\n\
         - Keep your responses helpful and focused on learning.\n\
         - The user is currently on the \"{}\" view of the application. Use this context to better understand their questions, \
         but don't state it unless it's directly relevant to the answer.",
        context
    )
}

pub fn explain(concept: &str) -> String {
    format!(
        "Please explain the following concept in a simple and easy-to-understand way. Use an analogy if it helps.\n\nConcept: \"{}\"",
        strip_html(concept)
    )
}

pub fn weekly_report(stats: &WeeklyStats) -> String {
    format!(
        "Based on the following weekly study statistics, generate a friendly and motivational \"Weekly Review\" report in Markdown format. \
         The report should include:\n\
         1. A positive opening.\n\
         2. A summary of the stats provided.\n\
         3. An encouraging observation about their progress.\n\
         4. One actionable suggestion for the upcoming week.\n\n\
         Stats:\n\
         - Total Study Time: {} hours\n\
         - Tasks Completed: {}\n\
         - Achievements Unlocked: {}\n",
        stats.hours, stats.tasks, stats.achievements
    )
}

pub fn mind_map(title: &str, note_content: &str) -> String {
    format!(
        "Analyze the following study note and generate a hierarchical mind map structure from it. The root node should be the main topic. \
         Create child nodes for key concepts and further sub-nodes for details. Provide a list of nodes (with id, label, and level) \
         and a list of edges (with from and to ids) to represent the connections. The note title is \"{}\".\n\nNote Content: \"{}\"",
        title,
        strip_html(note_content)
    )
}

pub fn mind_map_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "nodes": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "label": { "type": "STRING" },
                        "level": { "type": "INTEGER" }
                    },
                    "required": ["id", "label", "level"]
                }
            },
            "edges": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "from": { "type": "STRING" },
                        "to": { "type": "STRING" }
                    },
                    "required": ["from", "to"]
                }
            }
        },
        "required": ["nodes", "edges"]
    })
}

pub fn critique(concept: &str, explanation: &str) -> String {
    format!(
        "Act as a helpful tutor. I am using the Feynman Technique to learn.\n\
         My student-like explanation of a concept is below. Please analyze it and provide feedback in Markdown format.\n\
         - Point out any inaccuracies or parts that are confusing.\n\
         - Ask a clarifying question to test my understanding of a key area.\n\
         - Keep your tone encouraging and constructive.\n\n\
         Original Concept from my notes: \"{}\"\n\n\
         My Explanation: \"{}\"",
        strip_html(concept),
        explanation
    )
}

pub fn import(content: &str) -> String {
    format!(
        "Analyze the following block of text, which is likely from a web article or document. Based on the content, please:\n\
         1. Generate a concise, descriptive title.\n\
         2. Write a brief one-paragraph summary.\n\
         3. Suggest 3-5 relevant tags as a list of strings.\n\n\
         Text Content: \"{}\"",
        content
    )
}

pub fn import_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "summary": { "type": "STRING" },
            "tags": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["title", "summary", "tags"]
    })
}

pub fn prerequisite_resources(skill: &str) -> String {
    format!(
        "Act as an expert learning advisor. For the specific skill or prerequisite \"{}\", suggest 3-5 high-quality, diverse learning resources. \
         Include a variety of free resources like Articles, Videos, and official Documentation. If applicable, also include top-rated Paid Courses.\n\n\
         Provide the response in JSON format as an array of resource objects. \
         Each resource object must have a 'title', a valid 'url', and a 'type' from the allowed list.",
        skill
    )
}

pub fn resources_schema() -> Value {
    json!({ "type": "ARRAY", "items": resource_schema() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_prompts_strip_markup() {
        let prompt = quiz("<h1>Cells</h1><p>divide</p>");
        assert!(prompt.contains(" Cells  divide "));
        assert!(!prompt.contains("<p>"));
    }

    #[test]
    fn test_schemas_allow_known_resource_types() {
        let schema = resources_schema();
        let kinds = &schema["items"]["properties"]["type"]["enum"];
        assert_eq!(kinds.as_array().unwrap().len(), 7);
        assert_eq!(kinds[0], "Paid Course");
    }

    #[test]
    fn test_companion_instruction_names_view() {
        assert!(companion_instruction(StudyView::Flashcards).contains("\"flashcards\" view"));
    }
}
