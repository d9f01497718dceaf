//! Advanced reasoning techniques: multi-path exploration, act/observe loops,
//! self-critique and response scaffolding.

use super::{PromptTechnique, TechniqueKind};
use crate::types::{Params, json_i64, json_string_array, json_string_or, numbered_list};

pub(super) fn apply(kind: TechniqueKind, content: &str, params: &Params) -> String {
    match kind {
        TechniqueKind::TreeOfThoughts => tree_of_thoughts(content, params),
        TechniqueKind::React => react(content, params),
        TechniqueKind::SelfConsistency => self_consistency(content, params),
        TechniqueKind::Reflexion => reflexion(content, params),
        TechniqueKind::GenerateKnowledge => generate_knowledge(content, params),
        TechniqueKind::PrefillResponse => prefill_response(content, params),
        TechniqueKind::DirectionalStimulus => directional_stimulus(content, params),
        TechniqueKind::PromptChaining => prompt_chaining(content, params),
        TechniqueKind::GraphPrompting => graph_prompting(content, params),
        TechniqueKind::MetaPrompting => meta_prompting(content, params),
        TechniqueKind::ActivePrompt => active_prompt(content, params),
        _ => content.to_string(),
    }
}

/// List parameter, or `default` when absent or empty
fn list_or(params: &Params, key: &str, default: &[&str]) -> Vec<String> {
    let values = json_string_array(params, key);
    if values.is_empty() {
        default.iter().map(|s| s.to_string()).collect()
    } else {
        values
    }
}

fn tree_of_thoughts(content: &str, params: &Params) -> String {
    let paths = json_i64(params, "num_paths", 3);
    let criteria = json_string_or(
        params,
        "evaluation_criteria",
        "correctness, efficiency, and simplicity",
    );
    format!(
        "For this task, explore {paths} different approaches before determining the best solution.\n\n\
         For each approach:\n\
         1. Describe the approach\n\
         2. Reason step-by-step through the execution\n\
         3. Evaluate the pros and cons\n\n\
         {content}\n\n\
         After exploring these approaches, select the best one based on {criteria}. \
         Explain why you chose this approach, then implement the full solution using the chosen approach."
    )
}

fn react(content: &str, params: &Params) -> String {
    let actions = list_or(
        params,
        "available_actions",
        &["Search", "Analyze", "Calculate", "Decide"],
    );
    format!(
        "Solve this problem by alternating between Reasoning and Acting.\n\n\
         For each step:\n\
         1. Think: Reason about the current state and what to do next\n\
         2. Act: Choose one of these actions: {}\n\
         3. Observe: Consider the result of your action\n\n\
         Continue this process until you reach a solution.\n\n\
         Example of the format:\n\
         Think: I need to understand what data is available.\n\
         Act: Search for relevant information\n\
         Observe: I found X, Y, and Z.\n\
         Think: Now I need to analyze this information...\n\n\
         Problem:\n{}\n\nSolution:",
        actions.join(", "),
        content
    )
}

fn self_consistency(content: &str, params: &Params) -> String {
    let solutions = json_i64(params, "num_solutions", 3);
    format!(
        "Generate {solutions} different solutions to this problem. For each solution:\n\
         1. Use a different approach or perspective\n\
         2. Reason step-by-step to reach your answer\n\
         3. Clearly state your final answer\n\n\
         After generating all solutions, compare them and select the most consistent answer. \
         If the answers differ, explain why you believe your final selection is correct.\n\n\
         Problem:\n{content}"
    )
}

fn reflexion(content: &str, params: &Params) -> String {
    let points = list_or(
        params,
        "reflection_points",
        &["accuracy", "completeness", "clarity"],
    );
    format!(
        "Approach this task in three phases:\n\n\
         Phase 1: Generate an initial response to the problem\n\
         Phase 2: Reflect on your initial response, evaluating it for {}\n\
         Phase 3: Provide an improved response based on your reflection\n\n\
         Problem:\n{}",
        points.join(", "),
        content
    )
}

fn generate_knowledge(content: &str, params: &Params) -> String {
    let knowledge = json_string_or(params, "knowledge_type", "facts, concepts, and principles");
    format!(
        "Before answering this question, first identify the relevant {knowledge} you'll need.\n\n\
         Step 1: List the key information needed to answer this question\n\
         Step 2: For each item, provide the relevant knowledge\n\
         Step 3: Use this knowledge to formulate your answer\n\n\
         Question:\n{content}"
    )
}

fn prefill_response(content: &str, params: &Params) -> String {
    let mut response = json_string_or(params, "response_template", "");
    if response.is_empty() {
        let lower = content.to_lowercase();
        response = if lower.contains("analyze") || lower.contains("review") {
            "Analysis:\n1. Key Points:\n2. Strengths:\n3. Areas for Improvement:\n4. Recommendations:\n"
        } else if lower.contains("steps") || lower.contains("how to") {
            "Step-by-Step Guide:\nStep 1: \nStep 2: \nStep 3: \nAdditional Tips:\n"
        } else {
            "Here's my response:\n\n"
        }
        .to_string();
    }
    format!(
        "{content}\n\nPlease complete the following response template:\n\n{response}\n\n\
         Feel free to add more sections or details as necessary, but maintain this basic structure."
    )
}

fn directional_stimulus(content: &str, params: &Params) -> String {
    let direction = json_string_or(params, "direction", "");
    let stimulus = json_string_or(params, "stimulus", "");
    if direction.is_empty() || stimulus.is_empty() {
        return content.to_string();
    }
    format!("When approaching this task, consider the {direction} perspective: {stimulus}\n\n{content}")
}

fn prompt_chaining(content: &str, params: &Params) -> String {
    let steps = list_or(
        params,
        "steps",
        &[
            "Understand the problem and identify key requirements",
            "Break down the problem into manageable components",
            "Address each component in sequence",
            "Integrate the solutions to each component",
            "Review and refine the integrated solution",
        ],
    );
    format!(
        "This task will be solved in a series of steps. For each step:\n\
         1. Focus only on that specific step\n\
         2. Use the outputs from previous steps as inputs\n\
         3. Clearly indicate the output of each step\n\n\
         Steps to follow:\n{}\n\nTask:\n{}\n\nBegin with step 1:",
        numbered_list(&steps, ""),
        content
    )
}

fn graph_prompting(content: &str, params: &Params) -> String {
    let nodes = list_or(
        params,
        "node_types",
        &["Concepts", "Requirements", "Components", "Constraints"],
    );
    format!(
        "Approach this problem by creating a knowledge graph:\n\n\
         1. Identify key {} as nodes in the graph\n\
         2. Establish relationships between these nodes\n\
         3. Analyze the graph to identify important patterns or insights\n\
         4. Use these insights to develop your solution\n\n\
         Create your graph by listing each node and its relationships to other nodes.\n\n\
         Problem:\n{}",
        nodes.join(", "),
        content
    )
}

fn meta_prompting(content: &str, params: &Params) -> String {
    let quality = json_string_or(params, "objective", "comprehensive, accurate, and clear");
    format!(
        "To generate a {quality} response, follow these steps:\n\n\
         1. First, create the ideal prompt that would lead to the best possible answer for this question\n\
         2. Then, respond to that improved prompt\n\n\
         Make sure your improved prompt considers all relevant aspects of the question and \
         guides your thinking toward the most effective response.\n\n\
         Original question:\n{content}"
    )
}

fn active_prompt(content: &str, params: &Params) -> String {
    let iterations = json_i64(params, "iterations", 2);
    let criteria = json_string_or(
        params,
        "evaluation_criteria",
        "accuracy, completeness, and clarity",
    );
    let mut text = format!(
        "Approach this task through {iterations} iterations of improvement:\n\n\
         Iteration 1:\n\
         - Generate an initial response to the question\n\
         - Evaluate this response against these criteria: {criteria}\n\
         - Identify specific improvements needed\n\n\
         Iteration 2:\n\
         - Create an improved response addressing the identified issues\n\
         - Evaluate the new response against the same criteria\n\
         - Note any remaining improvements\n\n"
    );
    if iterations > 2 {
        text.push_str(
            "Iteration 3:\n\
             - Create a final response incorporating all improvements\n\
             - Provide a final evaluation\n\n",
        );
    }
    text.push_str("Question:\n");
    text.push_str(content);
    text
}

pub(super) fn techniques() -> Vec<PromptTechnique> {
    use TechniqueKind::*;

    let defs: [(&str, TechniqueKind, &str, &[&str], &[&str]); 11] = [
        (
            "tree_of_thoughts",
            TreeOfThoughts,
            "Explores multiple reasoning paths before selecting the best approach",
            &["complex_problems", "decision_making", "creative_tasks"],
            &["role_prompting"],
        ),
        (
            "react",
            React,
            "Alternates between reasoning and acting steps for complex tasks",
            &["multi_step_tasks", "information_gathering", "tool_use"],
            &["chain_of_thought", "role_prompting"],
        ),
        (
            "self_consistency",
            SelfConsistency,
            "Generates multiple solutions and selects the most consistent one",
            &["reasoning", "math", "decision_making"],
            &["chain_of_thought"],
        ),
        (
            "reflexion",
            Reflexion,
            "Incorporates self-reflection to evaluate and improve responses",
            &["all"],
            &["chain_of_thought", "few_shot"],
        ),
        (
            "generate_knowledge",
            GenerateKnowledge,
            "Explicitly generates relevant knowledge before answering",
            &["knowledge_intensive", "research", "analysis"],
            &["chain_of_thought", "role_prompting"],
        ),
        (
            "prefill_response",
            PrefillResponse,
            "Provides a partial response structure for completion",
            &["structured_output", "reports", "analysis"],
            &["role_prompting", "xml_tagging"],
        ),
        (
            "directional_stimulus",
            DirectionalStimulus,
            "Guides thinking in a specific direction with targeted prompts",
            &["creative_tasks", "brainstorming", "perspective_taking"],
            &["role_prompting", "chain_of_thought"],
        ),
        (
            "prompt_chaining",
            PromptChaining,
            "Breaks complex tasks into a sequence of simpler steps",
            &["complex_tasks", "multi_step_processes", "software_dev"],
            &["chain_of_thought", "role_prompting"],
        ),
        (
            "graph_prompting",
            GraphPrompting,
            "Represents knowledge and reasoning as a connected graph",
            &["complex_relationships", "system_design", "analysis"],
            &["chain_of_thought"],
        ),
        (
            "meta_prompting",
            MetaPrompting,
            "Asks the LLM to generate an effective prompt before solving",
            &["all"],
            &["role_prompting", "chain_of_thought"],
        ),
        (
            "active_prompt",
            ActivePrompt,
            "Iteratively refines the prompt based on feedback",
            &["complex_problems", "critical_tasks", "creative_work"],
            &["reflexion", "chain_of_thought"],
        ),
    ];

    defs.into_iter()
        .map(|(name, kind, description, applicability, compatibility)| {
            PromptTechnique::builtin(name, kind, description, "", applicability, compatibility)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(kind: TechniqueKind, content: &str, pairs: &[(&str, serde_json::Value)]) -> String {
        let params: Params = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        apply(kind, content, &params)
    }

    #[test]
    fn test_tree_of_thoughts_wraps_content() {
        let out = run(TechniqueKind::TreeOfThoughts, "TASK", &[("num_paths", json!(4))]);
        assert!(out.starts_with("For this task, explore 4 different approaches"));
        assert!(out.contains("Evaluate the pros and cons\n\nTASK\n\nAfter exploring"));
        assert!(out.contains("based on correctness, efficiency, and simplicity."));
    }

    #[test]
    fn test_react_actions() {
        let out = run(
            TechniqueKind::React,
            "TASK",
            &[("available_actions", json!(["Think", "Code"]))],
        );
        assert!(out.contains("Choose one of these actions: Think, Code\n"));
        assert!(out.ends_with("Problem:\nTASK\n\nSolution:"));

        let default = run(TechniqueKind::React, "TASK", &[]);
        assert!(default.contains("Search, Analyze, Calculate, Decide"));
    }

    #[test]
    fn test_prefill_response_detects_shape() {
        let analysis = run(TechniqueKind::PrefillResponse, "Review this essay", &[]);
        assert!(analysis.contains("Analysis:\n1. Key Points:"));

        let guide = run(TechniqueKind::PrefillResponse, "Explain how to bake", &[]);
        assert!(guide.contains("Step-by-Step Guide:"));

        let plain = run(TechniqueKind::PrefillResponse, "Write a poem", &[]);
        assert!(plain.contains("Here's my response:"));
    }

    #[test]
    fn test_directional_stimulus_requires_both_params() {
        assert_eq!(
            run(TechniqueKind::DirectionalStimulus, "TASK", &[("direction", json!("user"))]),
            "TASK"
        );
        let out = run(
            TechniqueKind::DirectionalStimulus,
            "TASK",
            &[("direction", json!("user")), ("stimulus", json!("think of novices"))],
        );
        assert_eq!(
            out,
            "When approaching this task, consider the user perspective: think of novices\n\nTASK"
        );
    }

    #[test]
    fn test_prompt_chaining_default_steps() {
        let out = run(TechniqueKind::PromptChaining, "TASK", &[]);
        assert!(out.contains("Steps to follow:\n1. Understand the problem"));
        assert!(out.contains("5. Review and refine the integrated solution\n\nTask:\nTASK"));
        assert!(out.ends_with("Begin with step 1:"));
    }

    #[test]
    fn test_active_prompt_iterations() {
        let two = run(TechniqueKind::ActivePrompt, "Q", &[]);
        assert!(!two.contains("Iteration 3:"));
        let three = run(TechniqueKind::ActivePrompt, "Q", &[("iterations", json!(3))]);
        assert!(three.contains("Iteration 3:"));
        assert!(three.ends_with("Question:\nQ"));
    }

    #[test]
    fn test_reflexion_and_graph() {
        assert!(run(TechniqueKind::Reflexion, "P", &[])
            .contains("evaluating it for accuracy, completeness, clarity\n"));
        assert!(run(TechniqueKind::GraphPrompting, "P", &[])
            .contains("Identify key Concepts, Requirements, Components, Constraints as nodes"));
    }

    #[test]
    fn test_registry_is_complete() {
        let names: Vec<String> = techniques().into_iter().map(|t| t.name).collect();
        assert_eq!(names.len(), 11);
        assert!(names.contains(&"meta_prompting".to_string()));
    }
}
