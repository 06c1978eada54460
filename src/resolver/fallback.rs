//! Static keyword-matched answers used when the pipeline is unavailable.

/// A canned answer selected when the lowercased question contains any keyword.
#[derive(Debug, Clone)]
pub struct FallbackRule {
    pub keywords: &'static [&'static str],
    pub answer: &'static str,
}

impl FallbackRule {
    fn matches(&self, question_lower: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| question_lower.contains(keyword))
    }
}

/// Ordered rules plus a default; first matching rule wins.
#[derive(Debug, Clone)]
pub struct FallbackTable {
    rules: Vec<FallbackRule>,
}

impl FallbackTable {
    pub fn new(rules: Vec<FallbackRule>) -> Self {
        Self { rules }
    }

    /// The portfolio table. Order matters: earlier rules shadow later ones.
    pub fn portfolio() -> Self {
        Self::new(vec![
            FallbackRule {
                keywords: &["tapnex"],
                answer: TAPNEX,
            },
            FallbackRule {
                keywords: &["rag", "retrieval"],
                answer: RAG,
            },
            FallbackRule {
                keywords: &["backend", "fastapi"],
                answer: BACKEND,
            },
            FallbackRule {
                keywords: &["ai", "ml", "artificial intelligence"],
                answer: AI_ML,
            },
            FallbackRule {
                keywords: &["skill", "technology", "tech stack"],
                answer: SKILLS,
            },
            FallbackRule {
                keywords: &["project"],
                answer: PROJECTS,
            },
            FallbackRule {
                keywords: &["contact", "reach", "email"],
                answer: CONTACT,
            },
            FallbackRule {
                keywords: &["cognito"],
                answer: COGNITO,
            },
        ])
    }

    pub fn rules(&self) -> &[FallbackRule] {
        &self.rules
    }

    pub fn lookup(&self, question: &str) -> String {
        let lower = question.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lower))
            .map(|rule| rule.answer.to_string())
            .unwrap_or_else(|| default_answer(question))
    }
}

fn default_answer(question: &str) -> String {
    format!(
        r#"Thanks for asking about "{}"!

I can help you learn about Prabhav's:
• Projects (like Tapnex)
• Skills (frontend, backend, AI/ML)
• Experience (Cognito Club, event tech)
• Tech stack and expertise

Try asking about specific topics, or check out the traditional portfolio page for a complete overview!

(Note: The RAG system will provide more detailed answers once dependencies are fully installed.)"#,
        question
    )
}

const TAPNEX: &str = "Tapnex is an innovative event technology platform founded by Prabhav Jain. It's powered by Nexgen FC and provides comprehensive event management solutions including:

• Volunteer Management - Efficient coordination and task assignment
• Cashless Access Control - Secure entry and payment systems
• Vendor Settlement - Automated payment reconciliation
• Event Coordination - Real-time updates and communication

The platform streamlines event operations and improves the experience for organizers, volunteers, and attendees.";

const RAG: &str = "Prabhav has expertise in RAG (Retrieval-Augmented Generation) systems! He's built this very portfolio using:

• LangChain for orchestration
• FAISS for vector similarity search
• Groq API for fast LLM inference
• HuggingFace embeddings for document processing

RAG allows AI systems to retrieve relevant information from a knowledge base before generating responses, making answers more accurate and contextual.";

const BACKEND: &str = "Prabhav is skilled in backend development, particularly with:

• FastAPI - Modern Python web framework
• Node.js & Express - JavaScript backend
• Django - Full-featured Python framework
• PostgreSQL & Supabase - Database management

He's built this portfolio's backend using FastAPI, demonstrating his ability to create production-ready APIs with proper CORS, validation, and error handling.";

const AI_ML: &str = "Prabhav specializes in AI and Machine Learning technologies:

• LangChain for AI application development
• RAG (Retrieval-Augmented Generation) systems
• Groq & Gemini APIs for LLM integration
• Vector Databases (FAISS, pgvector)
• Prompt Engineering
• Building production AI applications

He combines his full-stack development skills with cutting-edge AI to create innovative solutions.";

const SKILLS: &str = "Prabhav's technical skills span the full stack:

**Frontend:** React, Next.js, TypeScript, Tailwind CSS, Shadcn/ui, Framer Motion

**Backend:** Python, FastAPI, Node.js, Django, Express.js

**AI/ML:** LangChain, RAG, Groq API, Gemini API, Vector Databases

**Databases:** PostgreSQL, Supabase, MongoDB

**Tools:** Git, Docker, Vercel, VS Code

He's a B.Tech CSE student at Jain University, graduating in April 2027.";

const PROJECTS: &str = "Prabhav has worked on several innovative projects:

1. **Tapnex** - Event technology platform with volunteer management, cashless systems, and vendor settlement

2. **AI-Powered Frontend Code Generator** - Uses Groq API to generate React/Tailwind code from natural language prompts

3. **Swadeshi Prompt Builder** - Helps users craft better AI prompts with a freemium model using Gemini API

4. **This AI Portfolio** - RAG-powered portfolio with Next.js and FastAPI

Check out the traditional portfolio page for more details!";

const CONTACT: &str = "You can reach Prabhav through:

• Email: Check the traditional portfolio page
• LinkedIn: Available on the traditional portfolio
• GitHub: Find his projects and code
• Twitter: Connect for tech discussions

Or explore the traditional portfolio page for all contact options!";

const COGNITO: &str = "Prabhav is the Lead of The Cognito Club, where he:

• Manages the executive board
• Coordinates club activities
• Organizes technology-focused events
• Leads a team passionate about innovation and tech

This leadership role demonstrates his ability to manage teams and drive technical initiatives.";
